//! SyntaxKind enum for all tokens and nodes in the UCI CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the UCI CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// `#` comment running to the end of the line
    COMMENT,
    /// Unquoted word
    WORD,
    /// `'...'` string, no escapes
    SINGLE_QUOTED,
    /// `"..."` string with backslash escapes
    DOUBLE_QUOTED,
    /// `package` in statement position
    PACKAGE_KW,
    /// `config` in statement position
    CONFIG_KW,
    /// `option` in statement position
    OPTION_KW,
    /// `list` in statement position
    LIST_KW,
    /// Bytes the lexer could not match (stray backslash, unterminated quote)
    UNKNOWN,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root file node
    ROOT,
    /// `package <name>` statement
    PACKAGE,
    /// A `config` header plus the option and list statements that follow it
    SECTION,
    /// The `config <type> [<name>]` line
    SECTION_HEADER,
    /// `option <name> <value>` statement
    OPTION,
    /// `list <name> [<value>]` statement
    LIST,
    /// One value: adjacent words and quoted strings, concatenated
    VALUE,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace, newlines, comments).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Returns true if this token can be part of a VALUE node.
    pub fn is_value_part(self) -> bool {
        matches!(self, Self::WORD | Self::SINGLE_QUOTED | Self::DOUBLE_QUOTED)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UciLang {}

impl rowan::Language for UciLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<UciLang>;
pub type SyntaxToken = rowan::SyntaxToken<UciLang>;
pub type SyntaxElement = rowan::SyntaxElement<UciLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::LIST_KW.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::SECTION.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::COMMENT.is_trivia());
        assert!(!SyntaxKind::WORD.is_trivia());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::OPTION;
        let raw: rowan::SyntaxKind = kind.into();
        let back = UciLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
