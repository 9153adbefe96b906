//! Document to text.

use std::fmt;

use crate::document::Document;
use crate::tree::{NodeData, NodeId};

impl Document {
    /// Canonical UCI text for the live tree.
    ///
    /// ```text
    /// config <type> ['<name>']
    /// 	option <name> '<value>'
    /// 	list <name> '<value>'
    ///
    /// ```
    ///
    /// Anonymous sections are written without a name, so a re-parse numbers
    /// them again in the same order.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    fn write_section(&self, f: &mut fmt::Formatter<'_>, section: NodeId) -> fmt::Result {
        let pool = self.pool();
        let Some(node) = pool.get(section) else {
            return Ok(());
        };
        let type_ = node
            .parent
            .and_then(|parent| pool.get(parent))
            .and_then(|parent| parent.data.name());
        let (Some(type_), Some(name)) = (type_, node.data.name()) else {
            return Ok(());
        };

        if name.starts_with('@') {
            writeln!(f, "config {type_}")?;
        } else {
            writeln!(f, "config {type_} {}", quote(name))?;
        }

        for id in pool.live_children(section) {
            let Some(entry) = pool.get(id) else { continue };
            match &entry.data {
                NodeData::Option {
                    name: Some(name),
                    value: Some(value),
                } => writeln!(f, "\toption {name} {}", quote(value))?,
                NodeData::List { name: Some(name) } => {
                    let mut values = pool
                        .live_children(id)
                        .filter_map(|item| pool.get(item).and_then(|n| n.data.value()))
                        .peekable();
                    if values.peek().is_none() {
                        writeln!(f, "\tlist {name}")?;
                    }
                    for value in values {
                        writeln!(f, "\tlist {name} {}", quote(value))?;
                    }
                }
                _ => {}
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(package) = self.package() {
            writeln!(f, "package {package}")?;
            writeln!(f)?;
        }
        for section in self.sections() {
            self.write_section(f, section)?;
        }
        Ok(())
    }
}

/// Single quotes take everything literally except `'` itself, so values
/// holding one fall back to double quotes with `\` and `"` escaped.
fn quote(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain("static", "'static'")]
    #[case::spaces("two words", "'two words'")]
    #[case::empty("", "''")]
    #[case::backslash_alone("a\\b", "'a\\b'")]
    #[case::apostrophe("it's", "\"it's\"")]
    #[case::apostrophe_and_escapes("it's \"a\\b\"", "\"it's \\\"a\\\\b\\\"\"")]
    fn quoting(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(quote(value), expected);
    }

    #[test]
    fn empty_document_is_empty_text() {
        assert_eq!(Document::new().serialize(), "");
    }

    #[test]
    fn built_document_serializes() {
        // Given a document built through the edit API
        let mut doc = Document::new();
        doc.set_package(Some("network")).unwrap();
        let lan = doc.section_add(doc.root(), "interface", Some("lan")).unwrap();
        doc.option_add(lan, "proto", "static").unwrap();
        let dns = doc.list_add(lan, "dns").unwrap();
        doc.list_element_add(dns, "8.8.8.8").unwrap();
        doc.list_element_add(dns, "8.8.4.4").unwrap();
        doc.list_add(lan, "empty").unwrap();
        doc.section_add(doc.root(), "switch", None).unwrap();

        // Then the text is canonical
        insta::assert_snapshot!(doc.serialize(), @r"
        package network

        config interface 'lan'
        	option proto 'static'
        	list dns '8.8.8.8'
        	list dns '8.8.4.4'
        	list empty

        config switch
        ");
    }

    #[test]
    fn removed_nodes_are_not_written() {
        let mut doc = Document::new();
        let lan = doc.section_add(doc.root(), "interface", Some("lan")).unwrap();
        let proto = doc.option_add(lan, "proto", "static").unwrap();
        let dns = doc.list_add(lan, "dns").unwrap();
        let item = doc.list_element_add(dns, "8.8.8.8").unwrap();
        let wan = doc.section_add(doc.root(), "interface", Some("wan")).unwrap();

        doc.remove(proto).unwrap();
        doc.remove(item).unwrap();
        doc.remove(wan).unwrap();

        assert_eq!(doc.serialize(), "config interface 'lan'\n\tlist dns\n\n");
    }

    #[test]
    fn display_matches_serialize() {
        let mut doc = Document::new();
        doc.section_add(doc.root(), "system", None).unwrap();
        assert_eq!(format!("{doc}"), doc.serialize());
    }
}
