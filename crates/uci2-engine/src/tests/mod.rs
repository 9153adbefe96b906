//! Shared helpers for unit tests.

use crate::document::Document;
use crate::tree::NodeId;

/// Names of every live section, in iteration order.
pub fn live_names(doc: &Document) -> Vec<String> {
    names_of(doc, doc.sections())
}

/// Names of the given nodes. Panics on a node without a name.
pub fn names_of(doc: &Document, nodes: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    nodes
        .into_iter()
        .map(|id| {
            doc.pool()
                .get(id)
                .and_then(|node| node.data.name())
                .unwrap_or_else(|| panic!("node {id} has no name"))
                .to_string()
        })
        .collect()
}
