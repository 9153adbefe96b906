//! Replays the grammar's [`Event`]s into a rowan green tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::SyntaxKind;

pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: std::slice::Iter<'t, Token<'input>>,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens: tokens.iter(),
            events,
        }
    }

    /// Every token is attached exactly once, so the tree text equals the
    /// input text.
    pub fn finish(mut self) -> GreenNode {
        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => self.open(kind, forward_parent),
                Event::Token { kind } => self.token(kind),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }
        self.builder.finish()
    }

    /// Open `kind` and every node chained above it through `forward_parent`,
    /// outermost first. A SECTION_HEADER opens as SECTION > SECTION_HEADER.
    fn open(&mut self, kind: SyntaxKind, forward_parent: Option<usize>) {
        let mut chain = vec![kind];
        let mut next = forward_parent;
        while let Some(index) = next {
            next = None;
            if let Event::Start {
                kind,
                forward_parent,
            } = std::mem::replace(&mut self.events[index], Event::Placeholder)
            {
                chain.push(kind);
                next = forward_parent;
            }
        }
        for kind in chain.into_iter().rev() {
            self.builder.start_node(kind.into());
        }
    }

    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.next() {
            self.builder.token(kind.into(), token.text);
        }
    }
}
