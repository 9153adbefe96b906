//! Node storage: the arena and the node types that live in it.

pub mod node;
pub mod pool;

pub use node::{Node, NodeData, NodeId, NodeKind, NodeType};
pub use pool::Pool;
