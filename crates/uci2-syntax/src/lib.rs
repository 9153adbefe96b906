//! # uci2-syntax
//!
//! A lossless syntax tree for UCI configuration files using [Rowan] +
//! [Logos], following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What it parses
//!
//! ```text
//! package network
//!
//! config interface 'lan'
//!     option proto 'static'
//!     list dns '8.8.8.8'
//!
//! config switch
//!     option name "switch0"
//! ```
//!
//! Values may be bare words, `'single quoted'` (no escapes) or
//! `"double quoted"` (backslash escapes), and adjacent pieces concatenate.
//! `#` starts a comment.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The tree keeps every byte of the input, including comments and the
//! exact quoting. Consumers that only want the data use the typed views in
//! [`ast`], which strip quotes and resolve escapes.
//!
//! ## Module Structure
//!
//! ```text
//! uci2-syntax/
//! ├── lib.rs           # This file - public API and tree tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── ast.rs           # Typed views: SourceFile, Section, OptionDecl, ...
//! └── parser/
//!     ├── mod.rs       # Parser, Marker system, Parse result, SyntaxError
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to a Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs       # Root file parsing
//!         └── statement.rs # package / config / option / list lines
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use uci2_syntax::ast::Entry;
//! use uci2_syntax::parse;
//!
//! let file = parse("config system\n\toption hostname 'OpenWrt'\n").ok().unwrap();
//! let section = file.sections().next().unwrap();
//! assert_eq!(section.section_type().unwrap().text(), "system");
//!
//! let Some(Entry::Option(option)) = section.entries().next() else {
//!     panic!("expected an option");
//! };
//! assert_eq!(option.value().unwrap().text(), "OpenWrt");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, UciLang};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!("{}{:?}\n", prefix, node.kind()));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    result.push_str(&format!("{}  {:?} {:?}\n", prefix, t.kind(), t.text()));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_option_line() {
        let parse = parse("config a\n\toption x 'y'\n");
        assert_snapshot!(format_tree(&parse.syntax(), 0), @r#"
        ROOT
          SECTION
            SECTION_HEADER
              CONFIG_KW "config"
              WHITESPACE " "
              VALUE
                WORD "a"
              NEWLINE "\n"
            WHITESPACE "\t"
            OPTION
              OPTION_KW "option"
              WHITESPACE " "
              VALUE
                WORD "x"
              WHITESPACE " "
              VALUE
                SINGLE_QUOTED "'y'"
              NEWLINE "\n"
        "#);
    }

    #[test]
    fn snapshot_error_line() {
        let parse = parse("bogus\n");
        assert_snapshot!(format_tree(&parse.syntax(), 0), @r#"
        ROOT
          ERROR
            WORD "bogus"
          NEWLINE "\n"
        "#);
    }

    // Real configs are messy. Whatever the input, the tree keeps every byte.

    #[test]
    fn messy_input_is_lossless() {
        let input = r#"package  network   # trailing
config interface lan
	option ifname "eth0
	list 'unterminated
option outside
config
	option  proto	dhcp
random words here
	list dns "a\"b" 'c'd
"#;
        let parse = parse(input);
        assert!(!parse.errors().is_empty());
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "",
            "\n\n",
            "# only a comment",
            "package network\n",
            "config system\n",
            "config interface 'lan'\n\toption proto 'static'\n",
            "config a\r\n\tlist x y\r\n",
            "config a\n\toption x \"multi\nline\"\n",
        ];

        for input in inputs {
            let parse = parse(input);
            assert_eq!(
                parse.syntax().text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }

    #[test]
    fn well_formed_inputs_have_no_errors() {
        let input = "package network\n\nconfig interface 'lan'\n\toption proto 'static'\n\tlist dns '8.8.8.8'\n\tlist dns '8.8.4.4'\n\nconfig globals\n\toption ula_prefix auto\n";
        let parse = parse(input);
        assert_eq!(parse.errors(), &[]);
    }
}
