//! Typed views over the untyped CST.
//!
//! Each wrapper holds a [`SyntaxNode`] of one kind and exposes the pieces a
//! consumer cares about, with quoting already removed. They are cheap to
//! create and clone (Rowan nodes are reference counted).

use crate::syntax_kind::{SyntaxKind, SyntaxNode};

pub trait AstNode: Sized {
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(SourceFile, ROOT);
ast_node!(PackageDecl, PACKAGE);
ast_node!(Section, SECTION);
ast_node!(SectionHeader, SECTION_HEADER);
ast_node!(OptionDecl, OPTION);
ast_node!(ListDecl, LIST);
ast_node!(Value, VALUE);

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Package(PackageDecl),
    Section(Section),
}

/// A statement inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Option(OptionDecl),
    List(ListDecl),
}

impl SourceFile {
    /// Packages and sections in file order. ERROR nodes are skipped.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(|node| match node.kind() {
            SyntaxKind::PACKAGE => PackageDecl::cast(node).map(Item::Package),
            SyntaxKind::SECTION => Section::cast(node).map(Item::Section),
            _ => None,
        })
    }

    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.children().filter_map(Section::cast)
    }
}

impl PackageDecl {
    pub fn name(&self) -> Option<Value> {
        values(&self.0).next()
    }
}

impl Section {
    pub fn header(&self) -> Option<SectionHeader> {
        self.0.children().find_map(SectionHeader::cast)
    }

    pub fn section_type(&self) -> Option<Value> {
        self.header().and_then(|h| values(&h.0).next())
    }

    /// The explicit name, `None` for an anonymous section.
    pub fn name(&self) -> Option<Value> {
        self.header().and_then(|h| values(&h.0).nth(1))
    }

    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.children().filter_map(|node| match node.kind() {
            SyntaxKind::OPTION => OptionDecl::cast(node).map(Entry::Option),
            SyntaxKind::LIST => ListDecl::cast(node).map(Entry::List),
            _ => None,
        })
    }
}

impl OptionDecl {
    pub fn name(&self) -> Option<Value> {
        values(&self.0).next()
    }

    pub fn value(&self) -> Option<Value> {
        values(&self.0).nth(1)
    }
}

impl ListDecl {
    pub fn name(&self) -> Option<Value> {
        values(&self.0).next()
    }

    /// The element appended by this line, `None` for a bare `list <name>`.
    pub fn value(&self) -> Option<Value> {
        values(&self.0).nth(1)
    }
}

impl Value {
    /// The value with quotes removed and escapes resolved.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in self.0.children_with_tokens().filter_map(|e| e.into_token()) {
            let raw = token.text();
            match token.kind() {
                SyntaxKind::SINGLE_QUOTED => out.push_str(strip_quotes(raw)),
                SyntaxKind::DOUBLE_QUOTED => unescape_into(strip_quotes(raw), &mut out),
                _ => out.push_str(raw),
            }
        }
        out
    }

    /// Byte offset of the value in the source.
    pub fn offset(&self) -> usize {
        self.0.text_range().start().into()
    }
}

fn values(node: &SyntaxNode) -> impl Iterator<Item = Value> + use<> {
    node.children().filter_map(Value::cast)
}

fn strip_quotes(raw: &str) -> &str {
    raw.get(1..raw.len().saturating_sub(1)).unwrap_or("")
}

fn unescape_into(inner: &str, out: &mut String) {
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            // Escaped line break joins the lines.
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
}
