//! Text to document.
//!
//! The syntax crate builds the tree; this module replays each statement
//! through the public edit operations, so a parsed document obeys exactly
//! the same rules as one built by hand.

use std::str::FromStr;

use uci2_syntax::SyntaxError;
use uci2_syntax::ast::{Entry, Item, ListDecl, OptionDecl, Section, Value};

use crate::document::Document;
use crate::error::{Error, ParseError, Result};
use crate::tree::{NodeId, NodeKind};

impl Document {
    /// Parse UCI text into a fresh document.
    ///
    /// Any syntax error, or any statement the document refuses (a bad name,
    /// an option clashing with a list), fails the whole parse. Nothing
    /// partial is returned.
    ///
    /// Repeated statements follow UCI semantics: a second `config` header
    /// with the same type and name reopens the earlier section, a repeated
    /// `option` overwrites the value and `list` lines append.
    pub fn parse(text: &str) -> Result<Document> {
        let file = uci2_syntax::parse(text).ok().map_err(|errors| {
            let first = errors
                .into_iter()
                .next()
                .unwrap_or_else(|| SyntaxError::new("invalid input", 0..0));
            log::debug!("syntax error: {first}");
            syntax_error(text, &first)
        })?;

        let mut replay = Replay {
            doc: Document::new(),
            source: text,
        };
        for item in file.items() {
            match item {
                Item::Package(package) => {
                    let Some(name) = package.name() else { continue };
                    let package_name = name.text();
                    replay.check(&name, |doc| doc.set_package(Some(&package_name)))?;
                }
                Item::Section(section) => replay.section(&section)?,
            }
        }
        Ok(replay.doc)
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Document::parse(text)
    }
}

struct Replay<'s> {
    doc: Document,
    source: &'s str,
}

impl Replay<'_> {
    fn section(&mut self, section: &Section) -> Result<()> {
        let Some(type_value) = section.section_type() else {
            return Ok(());
        };
        let type_ = type_value.text();
        let name_value = section.name();
        let name = name_value.as_ref().map(Value::text);

        let reopened = name.as_deref().and_then(|name| self.reopen(&type_, name));
        let id = match reopened {
            Some(id) => {
                log::trace!("reopening section {type_} {id}");
                id
            }
            None => {
                let at = name_value.as_ref().unwrap_or(&type_value);
                let root = self.doc.root();
                self.check(at, |doc| doc.section_add(root, &type_, name.as_deref()))?
            }
        };

        for entry in section.entries() {
            match entry {
                Entry::Option(option) => self.option(id, &option)?,
                Entry::List(list) => self.list(id, &list)?,
            }
        }
        Ok(())
    }

    /// Live section of `type_` already called `name`.
    fn reopen(&self, type_: &str, name: &str) -> Option<NodeId> {
        let config = self.doc.config_root().ok()?;
        let section_type = self.doc.find_section_type(config, type_)?;
        self.doc.child_named(section_type, name)
    }

    fn option(&mut self, section: NodeId, option: &OptionDecl) -> Result<()> {
        let (Some(name_value), Some(value)) = (option.name(), option.value()) else {
            return Ok(());
        };
        let name = name_value.text();
        let value = value.text();

        match self.existing(section, &name) {
            Some((id, NodeKind::Option)) => {
                self.check(&name_value, |doc| doc.set_option_value(id, &value))?;
            }
            Some(_) => {
                return Err(self.error_at(&name_value, format!("option {name} is already a list")));
            }
            None => {
                self.check(&name_value, |doc| doc.option_add(section, &name, &value))?;
            }
        }
        Ok(())
    }

    fn list(&mut self, section: NodeId, list: &ListDecl) -> Result<()> {
        let Some(name_value) = list.name() else {
            return Ok(());
        };
        let name = name_value.text();

        let id = match self.existing(section, &name) {
            Some((id, NodeKind::List)) => id,
            Some(_) => {
                return Err(self.error_at(&name_value, format!("list {name} is already an option")));
            }
            None => self.check(&name_value, |doc| doc.list_add(section, &name))?,
        };

        if let Some(value) = list.value() {
            let text = value.text();
            self.check(&value, |doc| doc.list_element_add(id, &text))?;
        }
        Ok(())
    }

    fn existing(&self, section: NodeId, name: &str) -> Option<(NodeId, NodeKind)> {
        let id = self.doc.child_named(section, name)?;
        let kind = self.doc.pool().get(id)?.kind();
        Some((id, kind))
    }

    /// Run an edit, turning a refusal into a parse error at `at`.
    fn check<T>(&mut self, at: &Value, edit: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        edit(&mut self.doc).map_err(|err| {
            log::debug!("statement rejected: {err}");
            self.error_at(at, err.to_string())
        })
    }

    fn error_at(&self, at: &Value, message: String) -> Error {
        let offset = at.offset();
        syntax_error(self.source, &SyntaxError::new(message, offset..offset))
    }
}

fn syntax_error(source: &str, error: &SyntaxError) -> Error {
    let (line, column) = error.line_col(source);
    Error::Parse(ParseError {
        line,
        column,
        message: error.message.clone(),
    })
}

impl Document {
    /// Live child of `parent` carrying `name`.
    pub(crate) fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.pool()
            .live_children(parent)
            .find(|&id| self.pool().get(id).and_then(|node| node.data.name()) == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::live_names;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_sections_options_and_lists() {
        let doc = Document::parse(
            "config interface 'lan'\n\toption proto 'static'\n\tlist dns '8.8.8.8'\n\tlist dns 8.8.4.4\n",
        )
        .unwrap();

        let lan = doc.get(Some("lan"), None).unwrap();
        let proto = doc.get(Some("lan"), Some("proto")).unwrap();
        let dns = doc.get(Some("lan"), Some("dns")).unwrap();

        assert_eq!(doc.section_type(lan).unwrap(), "interface");
        assert_eq!(doc.option_value(proto).unwrap(), "static");
        assert_eq!(doc.list_values(dns).unwrap(), vec!["8.8.8.8", "8.8.4.4"]);
    }

    #[test]
    fn empty_input_is_empty_document() {
        for input in ["", "\n\n", "# only a comment\n"] {
            let doc = Document::parse(input).unwrap();
            assert_eq!(doc.sections().count(), 0, "{input:?}");
        }
    }

    #[test]
    fn package_is_recorded() {
        let doc = Document::parse("package network\n\nconfig interface lan\n").unwrap();
        assert_eq!(doc.package(), Some("network"));
    }

    #[test]
    fn anonymous_sections_are_numbered() {
        let doc = Document::parse("config rule\nconfig rule\nconfig zone\n").unwrap();
        assert_eq!(live_names(&doc), vec!["@rule[0]", "@rule[1]", "@zone[0]"]);
    }

    #[test]
    fn repeated_header_reopens_section() {
        // Given the same section opened twice
        let doc = Document::parse(
            "config interface lan\n\toption proto dhcp\nconfig interface wan\nconfig interface lan\n\toption mtu 1500\n",
        )
        .unwrap();

        // Then its options were collected into one section
        assert_eq!(live_names(&doc), vec!["lan", "wan"]);
        doc.get(Some("lan"), Some("proto")).unwrap();
        doc.get(Some("lan"), Some("mtu")).unwrap();
    }

    #[test]
    fn repeated_option_keeps_last_value() {
        let doc = Document::parse("config a x\n\toption v 1\n\toption v 2\n").unwrap();
        let v = doc.get(Some("x"), Some("v")).unwrap();
        assert_eq!(doc.option_value(v).unwrap(), "2");
    }

    #[test]
    fn bare_list_line_makes_empty_list() {
        let doc = Document::parse("config a x\n\tlist empty\n").unwrap();
        let list = doc.get(Some("x"), Some("empty")).unwrap();
        assert_eq!(doc.list_values(list).unwrap(), Vec::<&str>::new());
    }

    #[rstest]
    #[case::stray_option("option x y\n", 1, 1)]
    #[case::missing_value("config a\n\toption x\n", 2, 10)]
    #[case::unterminated("config a\n\toption x 'oops\n", 2, 11)]
    fn syntax_errors_have_positions(#[case] input: &str, #[case] line: usize, #[case] column: usize) {
        let err = Document::parse(input).unwrap_err();
        match err {
            Error::Parse(parse) => {
                assert_eq!((parse.line, parse.column), (line, column), "{}", parse.message);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[rstest]
    #[case::option_then_list("config a x\n\toption dns 1\n\tlist dns 2\n", 3)]
    #[case::list_then_option("config a x\n\tlist dns 1\n\toption dns 2\n", 3)]
    #[case::reserved_name("config a '@a[0]'\n", 1)]
    #[case::quoted_type("config 'two words'\n", 1)]
    #[case::package_with_space("package 'a b'\n", 1)]
    fn rejected_statements_fail_the_parse(#[case] input: &str, #[case] line: usize) {
        let err = Document::parse(input).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Parser);
        match err {
            Error::Parse(parse) => assert_eq!(parse.line, line),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn same_name_under_another_type_is_a_new_section() {
        let doc = Document::parse("config interface lan\nconfig zone lan\n").unwrap();
        assert_eq!(live_names(&doc), vec!["lan", "lan"]);
    }

    #[test]
    fn from_str() {
        let doc: Document = "config system\n".parse().unwrap();
        assert_eq!(live_names(&doc), vec!["@system[0]"]);
    }
}
