//! Flat event log the grammar writes and the sink replays into a tree.
//!
//! A section with one option comes out as:
//!
//! ```text
//! Start(SECTION_HEADER, forward_parent: i)
//!   Token(CONFIG_KW) Token(WHITESPACE)
//!   Start(VALUE) Token(WORD) Finish
//!   Token(NEWLINE)
//! Finish
//! Start(SECTION)            <- index i, opened before the header
//!   Start(OPTION) ... Finish
//! Finish
//! ```
//!
//! The grammar only knows a line starts a section after it has parsed the
//! `config` header, so SECTION is attached afterwards through the header's
//! `forward_parent`.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a node. `forward_parent` is the index of a later `Start` that
    /// must be opened first and wraps this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Consume the next lexer token, stored as `kind`. Keywords arrive as
    /// WORD and are remapped here.
    Token { kind: SyntaxKind },

    Finish,

    /// Reserved slot of an open marker. Left in place if the marker is
    /// abandoned; the sink skips it.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_has_no_forward_parent() {
        assert_eq!(
            Event::start(SyntaxKind::SECTION_HEADER),
            Event::Start {
                kind: SyntaxKind::SECTION_HEADER,
                forward_parent: None
            }
        );
    }

    #[test]
    fn token_keeps_remapped_kind() {
        assert_eq!(
            Event::token(SyntaxKind::LIST_KW),
            Event::Token {
                kind: SyntaxKind::LIST_KW
            }
        );
    }
}
