//! Statement-level grammar rules.

use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

/// Parse `config <type> [<name>]` and every option/list line that follows it.
pub(super) fn section(p: &mut Parser<'_, '_>) {
    let header = section_header(p);
    let m = header.precede(p);

    loop {
        while p.current().is_trivia() {
            p.bump();
        }
        if p.at_keyword("option") {
            option(p);
        } else if p.at_keyword("list") {
            list(p);
        } else {
            break;
        }
    }

    m.complete(p, SyntaxKind::SECTION);
}

fn section_header(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump_remap(SyntaxKind::CONFIG_KW);

    let ok = if value_after_space(p) {
        // The name is optional: anonymous sections have none.
        value_after_space(p);
        true
    } else {
        p.error("expected section type after `config`");
        false
    };
    finish_line(p, ok);

    m.complete(p, SyntaxKind::SECTION_HEADER)
}

/// Parse `package <name>`.
pub(super) fn package(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::PACKAGE_KW);

    let ok = value_after_space(p);
    if !ok {
        p.error("expected package name after `package`");
    }
    finish_line(p, ok);

    m.complete(p, SyntaxKind::PACKAGE);
}

fn option(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::OPTION_KW);

    let ok = if !value_after_space(p) {
        p.error("expected option name after `option`");
        false
    } else if !value_after_space(p) {
        p.error("expected option value");
        false
    } else {
        true
    };
    finish_line(p, ok);

    m.complete(p, SyntaxKind::OPTION);
}

fn list(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::LIST_KW);

    let ok = value_after_space(p);
    if ok {
        // `list <name>` on its own declares an empty list.
        value_after_space(p);
    } else {
        p.error("expected list name after `list`");
    }
    finish_line(p, ok);

    m.complete(p, SyntaxKind::LIST);
}

/// Skip horizontal whitespace, then parse a VALUE if one starts here.
fn value_after_space(p: &mut Parser<'_, '_>) -> bool {
    p.eat(SyntaxKind::WHITESPACE);
    if !p.current().is_value_part() {
        return false;
    }

    let m = p.start();
    while p.current().is_value_part() {
        p.bump();
    }
    m.complete(p, SyntaxKind::VALUE);
    true
}

/// Consume the end of a statement line.
///
/// When the statement itself parsed cleanly, leftover tokens are an error.
/// When it already reported one, the leftovers are swallowed quietly.
fn finish_line(p: &mut Parser<'_, '_>, ok: bool) {
    p.eat(SyntaxKind::WHITESPACE);
    p.eat(SyntaxKind::COMMENT);
    if p.at_end() || p.eat(SyntaxKind::NEWLINE) {
        return;
    }

    if ok {
        let message = unexpected(p);
        p.error(message);
    }
    error_line(p);
}

/// Wrap the rest of the current line in an ERROR node.
pub(super) fn error_line(p: &mut Parser<'_, '_>) {
    let m = p.start();
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    m.complete(p, SyntaxKind::ERROR);
    p.eat(SyntaxKind::NEWLINE);
}

fn unexpected(p: &Parser<'_, '_>) -> String {
    let text = p.current_text();
    match p.current() {
        SyntaxKind::UNKNOWN if text.starts_with(['\'', '"']) => {
            "unterminated quoted string".to_string()
        }
        _ => format!("unexpected `{}`", text.escape_debug()),
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|n| n.kind()).collect()
    }

    #[test]
    fn options_and_lists_nest_under_section() {
        let parse = parse("config interface 'lan'\n\toption proto static\n\tlist dns 1.1.1.1\n");
        assert!(parse.errors().is_empty());

        let section = parse.syntax().first_child().unwrap();
        assert_eq!(
            kinds(&section),
            vec![
                SyntaxKind::SECTION_HEADER,
                SyntaxKind::OPTION,
                SyntaxKind::LIST
            ]
        );
    }

    #[test]
    fn second_config_starts_new_section() {
        let parse = parse("config a\n\toption x 1\n\nconfig b\n");
        assert_eq!(
            kinds(&parse.syntax()),
            vec![SyntaxKind::SECTION, SyntaxKind::SECTION]
        );
    }

    #[test]
    fn keywords_only_count_at_statement_start() {
        let parse = parse("config config config\n\toption option list\n");
        assert!(parse.errors().is_empty());

        let option = parse.syntax().first_child().unwrap().children().nth(1).unwrap();
        let tokens: Vec<_> = option
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .collect();
        assert_eq!(tokens[0], SyntaxKind::OPTION_KW);
    }

    #[test]
    fn comments_and_blank_lines_are_allowed_everywhere() {
        let input = "# header\n\nconfig a # trailing\n\n\t# inside\n\toption x 1 # note\n";
        let parse = parse(input);
        assert!(parse.errors().is_empty(), "{:?}", parse.errors());
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn file_without_trailing_newline() {
        let parse = parse("config a\n\toption x 1");
        assert!(parse.errors().is_empty());
    }

    #[rstest]
    #[case::missing_type("config\n", "expected section type after `config`")]
    #[case::missing_option_value("config a\n\toption x\n", "expected option value")]
    #[case::missing_option_name("config a\n\toption\n", "expected option name after `option`")]
    #[case::missing_list_name("config a\n\tlist\n", "expected list name after `list`")]
    #[case::missing_package_name("package\n", "expected package name after `package`")]
    #[case::stray_option("option x 1\n", "`option` outside of a `config` section")]
    #[case::unknown_statement("interface lan\n", "expected `config` or `package`, found `interface`")]
    #[case::trailing_garbage("config a b c\n", "unexpected `c`")]
    #[case::unterminated_quote("config a 'b\n", "unterminated quoted string")]
    fn reports_errors(#[case] input: &str, #[case] message: &str) {
        let parse = parse(input);
        let messages: Vec<_> = parse.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec![message]);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn recovers_on_next_line() {
        let parse = parse("config a\n\toption\n\toption y 2\n");
        assert_eq!(parse.errors().len(), 1);

        let section = parse.syntax().first_child().unwrap();
        assert_eq!(section.children().filter(|n| n.kind() == SyntaxKind::OPTION).count(), 2);
    }
}
