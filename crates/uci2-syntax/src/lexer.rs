//! # Lexer - Tokenizing UCI Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Bytes Logos cannot
//! match become `UNKNOWN` tokens rather than being dropped, so the parser can
//! report them with an exact position:
//!
//! ```
//! use uci2_syntax::lexer::lex;
//!
//! let input = "config system\n\toption hostname 'OpenWrt'\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Keywords are contextual
//!
//! `config`, `option`, `list` and `package` are lexed as plain `WORD`s. They
//! only act as keywords at the start of a statement, which the parser decides
//! (see [`crate::parser::Parser::at_keyword`]). That keeps
//! `option config 'x'` legal: the second `config` is just a name.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Comment up to (not including) the line ending
    #[regex(r"#[^\r\n]*")]
    Comment,

    /// `'...'`, may span lines, no escapes
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// `"..."` with backslash escapes
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    DoubleQuoted,

    /// Bare word. `#` is allowed after the first character.
    #[regex(r##"[^\s'"#\\][^\s'"\\]*"##)]
    Word,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::SingleQuoted => SyntaxKind::SINGLE_QUOTED,
            TokenKind::DoubleQuoted => SyntaxKind::DOUBLE_QUOTED,
            TokenKind::Word => SyntaxKind::WORD,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// True if `text` lexes as exactly one bare `WORD`, i.e. it can be written
/// without quotes and read back unchanged.
pub fn is_word(text: &str) -> bool {
    let mut lexer = TokenKind::lexer(text);
    matches!(lexer.next(), Some(Ok(TokenKind::Word))) && lexer.slice().len() == text.len()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => SyntaxKind::UNKNOWN,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
