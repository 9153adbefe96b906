//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a syntax tree using the **event-based**
//! architecture from rust-analyzer: grammar rules emit a flat list of
//! [`Event`]s and the [`Sink`] builds the Rowan tree from them.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that **must** be either completed
//! (`marker.complete(p, KIND)`) or abandoned (`marker.abandon(p)`). Dropping
//! it otherwise panics, which catches grammar bugs before they corrupt a tree.
//!
//! ```ignore
//! let m = p.start();
//! p.bump_remap(SyntaxKind::OPTION_KW);
//! // ...
//! m.complete(p, SyntaxKind::OPTION);
//! ```
//!
//! `CompletedMarker::precede()` wraps an already finished node in a new
//! parent. The grammar uses it to grow a `SECTION` around its header once it
//! knows the header parsed.
//!
//! ## Errors
//!
//! Grammar rules never bail out. They record a [`SyntaxError`] with a byte
//! range and keep going, wrapping whatever they could not make sense of in an
//! `ERROR` node. [`Parse`] carries both the tree and the collected errors.
//!
//! ```
//! use uci2_syntax::parse;
//!
//! let parse = parse("option stray 'x'\n");
//! assert_eq!(parse.errors().len(), 1);
//! assert_eq!(parse.syntax().text().to_string(), "option stray 'x'\n");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use std::ops::Range;

use rowan::GreenNode;

use crate::ast::{AstNode, SourceFile};
use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// A syntax error with the byte range it covers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub range: Range<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }

    /// 1-based line and column of the start of the error in `source`.
    /// Columns count characters, not bytes.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.range.start.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
        (line, before[line_start..].chars().count() + 1)
    }
}

/// The result of parsing: a lossless tree plus any errors found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn tree(&self) -> SourceFile {
        SourceFile::cast(self.syntax()).unwrap_or_else(|| unreachable!("parse always yields ROOT"))
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// The typed tree, or every error if there was at least one.
    pub fn ok(self) -> Result<SourceFile, Vec<SyntaxError>> {
        if self.errors.is_empty() {
            Ok(self.tree())
        } else {
            Err(self.errors)
        }
    }
}

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events and errors.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`, `at_keyword()`
/// - Consume tokens: `bump()`, `bump_remap()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
/// - Report problems: `error()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    offset: usize,
    events: Vec<Event>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            offset: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the tokens and return the tree with its errors.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let green = Sink::new(self.tokens, self.events).finish();
        Parse {
            green,
            errors: self.errors,
        }
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// True if the current token is the bare word `keyword`.
    pub fn at_keyword(&self, keyword: &str) -> bool {
        self.at(SyntaxKind::WORD) && self.current_text() == keyword
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consume the current token, recording it as `kind` in the tree.
    pub fn bump_remap(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.events.push(Event::token(kind));
            self.offset += token.text.len();
            self.pos += 1;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.tokens.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    /// Byte range of the current token (empty at end of input).
    pub fn current_range(&self) -> Range<usize> {
        self.offset..self.offset + self.current_text().len()
    }

    /// Record an error covering the current token.
    pub fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range));
    }
}

/// A marker for a node being constructed.
///
/// The `#[must_use]` attribute and the `Drop` impl together enforce that
/// every marker is either completed or abandoned.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandon this marker without creating a node.
    ///
    /// The placeholder is removed if it is the last event, otherwise it is
    /// left inert for the Sink to skip.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A marker for a node that has been completed.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse UCI source into a syntax tree plus errors.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
