use super::node::{Node, NodeData, NodeId, NodeKind};

/// Arena owning every node ever created for one document.
///
/// Nodes are only ever appended. Removal marks a node dead by clearing its
/// parent link, so `len()` counts allocations, not live nodes. Dropping the
/// pool frees everything at once.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    nodes: Vec<Node>,
}

impl Pool {
    /// Allocate an unlinked node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Append `child` to `parent`'s children and point it back at `parent`.
    /// No legality check: callers enforce kind rules.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Re-parent every child of `from` onto the end of `to`, keeping order,
    /// and leave `from` with no children.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.nodes[from.index()].children);
        for &child in &moved {
            // Children already removed stay removed.
            if self.nodes[child.index()].parent == Some(from) {
                self.nodes[child.index()].parent = Some(to);
            }
        }
        self.nodes[to.index()].children.extend(moved);
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A node is live when its parent chain reaches the root unbroken.
    pub fn is_live(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.get(current) else {
                return false;
            };
            if node.kind() == NodeKind::Root {
                return true;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Children of `id` still attached to it, in insertion order.
    ///
    /// Assumes `id` itself is live; liveness of the parent is not rechecked.
    pub fn live_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(move |&child| self.nodes[child.index()].parent == Some(id))
    }
}
