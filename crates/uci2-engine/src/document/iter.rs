use std::slice;

use super::Document;
use crate::error::{Error, Result};
use crate::tree::{NodeId, NodeKind, Pool};

/// Lazy walk over the live children of a node.
///
/// Created by [`Document::iter`]. For the document root it yields every live
/// section (flattening the type level away); for a section or list it yields
/// the live direct children. Removed nodes and anything beneath them are
/// skipped. The iterator borrows the document, so the tree cannot change
/// under it.
pub struct NodeIter<'a> {
    pool: &'a Pool,
    state: State<'a>,
}

enum State<'a> {
    Sections {
        config: NodeId,
        types: slice::Iter<'a, NodeId>,
        current: Option<(NodeId, slice::Iter<'a, NodeId>)>,
    },
    Children {
        parent: NodeId,
        children: slice::Iter<'a, NodeId>,
    },
}

impl Document {
    /// Iterate a root, section or list.
    pub fn iter(&self, node: NodeId) -> Result<NodeIter<'_>> {
        let kind = self.live(node)?.kind();
        let pool = self.pool();
        let state = match kind {
            NodeKind::Root | NodeKind::ConfigGroup => {
                let config = if kind == NodeKind::Root {
                    self.config_root()?
                } else {
                    node
                };
                State::Sections {
                    config,
                    types: children_of(pool, config).iter(),
                    current: None,
                }
            }
            NodeKind::SectionName | NodeKind::List => State::Children {
                parent: node,
                children: children_of(pool, node).iter(),
            },
            other => {
                log::debug!("cannot iterate a {other:?}");
                return Err(Error::TypeMismatch(format!(
                    "a {} cannot be iterated",
                    other.node_type()
                )));
            }
        };
        Ok(NodeIter { pool, state })
    }
}

impl NodeIter<'_> {
    /// Like [`Iterator::next`], but reports the end as
    /// [`Error::IteratorEnd`].
    pub fn next_node(&mut self) -> Result<NodeId> {
        self.next().ok_or(Error::IteratorEnd)
    }
}

impl Iterator for NodeIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let pool = self.pool;
        match &mut self.state {
            State::Children { parent, children } => {
                let parent = *parent;
                children.copied().find(|&c| attached(pool, c, parent))
            }
            State::Sections {
                config,
                types,
                current,
            } => loop {
                if let Some((ty, names)) = current {
                    let ty = *ty;
                    if let Some(section) = names.copied().find(|&c| attached(pool, c, ty)) {
                        return Some(section);
                    }
                }
                let config = *config;
                let ty = types.copied().find(|&t| attached(pool, t, config))?;
                *current = Some((ty, children_of(pool, ty).iter()));
            },
        }
    }
}

fn children_of(pool: &Pool, id: NodeId) -> &[NodeId] {
    pool.get(id).map(|node| node.children.as_slice()).unwrap_or_default()
}

fn attached(pool: &Pool, child: NodeId, parent: NodeId) -> bool {
    pool.get(child).is_some_and(|node| node.parent == Some(parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::names_of;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_iteration_flattens_types() {
        // Given sections of two types, added interleaved
        let mut doc = Document::new();
        let root = doc.root();
        doc.section_add(root, "system", None).unwrap();
        doc.section_add(root, "timeserver", Some("ntp")).unwrap();
        doc.section_add(root, "system", None).unwrap();

        // Then iteration groups by type in first-seen order
        let names = names_of(&doc, doc.iter(root).unwrap());
        assert_eq!(names, vec!["@system[0]", "@system[1]", "ntp"]);

        let config = doc.config_root().unwrap();
        assert_eq!(doc.iter(config).unwrap().count(), 3);
    }

    #[test]
    fn removed_nodes_are_skipped() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.section_add(root, "t", Some("a")).unwrap();
        let b = doc.section_add(root, "t", Some("b")).unwrap();
        let x = doc.option_add(b, "x", "1").unwrap();
        doc.option_add(b, "y", "2").unwrap();

        doc.remove(a).unwrap();
        doc.remove(x).unwrap();

        assert_eq!(names_of(&doc, doc.iter(root).unwrap()), vec!["b"]);
        assert_eq!(names_of(&doc, doc.iter(b).unwrap()), vec!["y"]);
    }

    #[test]
    fn list_iteration_yields_elements() {
        let mut doc = Document::new();
        let lan = doc.section_add(doc.root(), "interface", Some("lan")).unwrap();
        let dns = doc.list_add(lan, "dns").unwrap();
        let first = doc.list_element_add(dns, "a").unwrap();
        let second = doc.list_element_add(dns, "b").unwrap();

        let items: Vec<_> = doc.iter(dns).unwrap().collect();
        assert_eq!(items, vec![first, second]);
    }

    #[test]
    fn next_node_signals_end() {
        let mut doc = Document::new();
        let lan = doc.section_add(doc.root(), "interface", Some("lan")).unwrap();
        let proto = doc.option_add(lan, "proto", "static").unwrap();

        let mut iter = doc.iter(lan).unwrap();
        assert_eq!(iter.next_node().unwrap(), proto);
        assert!(matches!(iter.next_node(), Err(Error::IteratorEnd)));
        // Exhausted iterators stay exhausted.
        assert!(matches!(iter.next_node(), Err(Error::IteratorEnd)));
    }

    #[test]
    fn empty_document_iterates_nothing() {
        let doc = Document::new();
        assert_eq!(doc.iter(doc.root()).unwrap().count(), 0);
    }

    #[test]
    fn iter_rejects_options_and_dead_nodes() {
        let mut doc = Document::new();
        let lan = doc.section_add(doc.root(), "interface", Some("lan")).unwrap();
        let proto = doc.option_add(lan, "proto", "static").unwrap();
        let dns = doc.list_add(lan, "dns").unwrap();
        let item = doc.list_element_add(dns, "x").unwrap();

        assert!(matches!(doc.iter(proto), Err(Error::TypeMismatch(_))));
        assert!(matches!(doc.iter(item), Err(Error::TypeMismatch(_))));

        doc.remove(lan).unwrap();
        assert!(matches!(doc.iter(lan), Err(Error::NotFound(_))));
        assert!(matches!(doc.iter(dns), Err(Error::NotFound(_))));
    }
}
