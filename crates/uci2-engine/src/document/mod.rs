//! The document and every structural edit on it.
//!
//! A [`Document`] owns a [`Pool`] shaped like this:
//!
//! ```text
//! Root
//! └── ConfigGroup
//!     ├── SectionType "interface"
//!     │   ├── SectionName "lan"
//!     │   │   ├── Option proto = "static"
//!     │   │   └── List dns
//!     │   │       ├── ListItem "8.8.8.8"
//!     │   │       └── ListItem "8.8.4.4"
//!     │   └── SectionName "@interface[0]"
//!     └── SectionType "system"
//!         └── ...
//! ```
//!
//! Callers hold [`NodeId`]s. Sections are addressed by their SectionName
//! node; the SectionType above it only carries the shared type string.
//!
//! Every edit validates first (handle, liveness, kind, argument, uniqueness)
//! and only then touches the pool, so an `Err` always means "nothing
//! changed". Removal never frees: it detaches the node from its parent and
//! the pool keeps the slot until the document is dropped.

mod attributes;
mod iter;
mod merge;

pub use iter::NodeIter;

use crate::error::{Error, Result};
use crate::tree::{Node, NodeData, NodeId, NodeKind, NodeType, Pool};

#[derive(Debug, Clone)]
pub struct Document {
    pool: Pool,
    root: NodeId,
    package: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: a Root holding an empty ConfigGroup.
    pub fn new() -> Self {
        let mut pool = Pool::default();
        let root = pool.create(NodeData::Root);
        let config = pool.create(NodeData::ConfigGroup);
        pool.link(root, config);
        Self {
            pool,
            root,
            package: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The ConfigGroup under the root, parent of every SectionType.
    pub fn config_root(&self) -> Result<NodeId> {
        self.pool
            .live_children(self.root)
            .find(|&id| self.kind_unchecked(id) == NodeKind::ConfigGroup)
            .ok_or_else(|| Error::NotFound("document has no config group".to_string()))
    }

    /// Number of nodes ever allocated, removed ones included.
    pub fn allocated(&self) -> usize {
        self.pool.len()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn set_package(&mut self, package: Option<&str>) -> Result<()> {
        if let Some(name) = package {
            check_word("package name", name)?;
        }
        self.package = package.map(str::to_string);
        Ok(())
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.pool.is_live(node)
    }

    /// Caller-visible kind of a live node.
    pub fn node_type(&self, node: NodeId) -> Result<NodeType> {
        Ok(self.live(node)?.kind().node_type())
    }

    /// Add a section of type `type_` under the config root.
    ///
    /// `parent` may be the document root or the config group. Without a
    /// `name` the section becomes anonymous and is named `@<type>[<N>]`.
    pub fn section_add(&mut self, parent: NodeId, type_: &str, name: Option<&str>) -> Result<NodeId> {
        let config = self.resolve_config(parent)?;
        check_word("section type", type_)?;
        if let Some(name) = name {
            check_section_name(name)?;
        }
        let existing = self.find_section_type(config, type_);
        if let (Some(group), Some(name)) = (existing, name) {
            self.ensure_unique(group, name, None)?;
        }

        let section_type = match existing {
            Some(group) => group,
            None => {
                let group = self.pool.create(NodeData::SectionType {
                    name: Some(type_.to_string()),
                    anonymous_count: 0,
                });
                self.pool.link(config, group);
                group
            }
        };
        let section = self.pool.create(NodeData::SectionName {
            name: name.map(str::to_string),
        });
        self.pool.link(section_type, section);
        self.assign_anonymous_name(section);

        log::trace!("added section {section} of type {type_}");
        Ok(section)
    }

    pub fn option_add(&mut self, parent: NodeId, name: &str, value: &str) -> Result<NodeId> {
        self.check_child(parent, NodeKind::Option)?;
        check_word("option name", name)?;
        self.ensure_unique(parent, name, None)?;

        let option = self.pool.create(NodeData::Option {
            name: Some(name.to_string()),
            value: Some(value.to_string()),
        });
        self.pool.link(parent, option);
        Ok(option)
    }

    pub fn list_add(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.check_child(parent, NodeKind::List)?;
        check_word("list name", name)?;
        self.ensure_unique(parent, name, None)?;

        let list = self.pool.create(NodeData::List {
            name: Some(name.to_string()),
        });
        self.pool.link(parent, list);
        Ok(list)
    }

    /// Append a value to a list. Values need not be unique.
    pub fn list_element_add(&mut self, parent: NodeId, value: &str) -> Result<NodeId> {
        self.check_child(parent, NodeKind::ListItem)?;

        let item = self.pool.create(NodeData::ListItem {
            value: Some(value.to_string()),
        });
        self.pool.link(parent, item);
        Ok(item)
    }

    /// Tombstone a node. O(1): its subtree stays allocated but is never
    /// visited again. Removing an already removed node does nothing.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        let kind = self.node(node)?.kind();
        if matches!(kind, NodeKind::Root | NodeKind::ConfigGroup) {
            log::debug!("refusing to remove document root {node}");
            return Err(Error::TypeMismatch("the document root cannot be removed".to_string()));
        }
        self.detach(node);
        Ok(())
    }

    /// Two-level lookup from the config root.
    ///
    /// - `get(None, None)` is the config root.
    /// - `get(Some(section), None)` is the first live section named `section`.
    /// - `get(Some(section), Some(option))` is the option or list named
    ///   `option` in that section.
    pub fn get(&self, section: Option<&str>, option: Option<&str>) -> Result<NodeId> {
        let config = self.config_root()?;
        let Some(section_name) = section else {
            if option.is_some() {
                return Err(Error::InvalidArgument(
                    "an option lookup needs a section".to_string(),
                ));
            }
            return Ok(config);
        };

        let section = self
            .sections()
            .find(|&id| self.name_unchecked(id) == Some(section_name))
            .ok_or_else(|| {
                log::debug!("no live section named {section_name}");
                Error::NotFound(format!("section {section_name}"))
            })?;

        let Some(option_name) = option else {
            return Ok(section);
        };
        self.pool
            .live_children(section)
            .find(|&id| self.name_unchecked(id) == Some(option_name))
            .ok_or_else(|| {
                log::debug!("no live option or list {option_name} in {section_name}");
                Error::NotFound(format!("{section_name}.{option_name}"))
            })
    }

    /// Every live section in document order.
    pub fn sections(&self) -> impl Iterator<Item = NodeId> + '_ {
        let types = self
            .config_root()
            .map(|config| self.pool.live_children(config).collect::<Vec<_>>())
            .unwrap_or_default();
        types
            .into_iter()
            .flat_map(move |ty| self.pool.live_children(ty))
    }

    // === Internal helpers ===

    pub(crate) fn pool(&self) -> &Pool {
        &self.pool
    }

    pub(crate) fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }

    /// Node behind a handle, dead or alive.
    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.pool
            .get(id)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown node handle {id}")))
    }

    /// Node behind a handle, only if it is still reachable from the root.
    pub(crate) fn live(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        if !self.pool.is_live(id) {
            log::debug!("node {id} has been removed");
            return Err(Error::NotFound(format!("node {id} has been removed")));
        }
        Ok(node)
    }

    /// Live node of exactly `kind`.
    pub(crate) fn live_of(&self, id: NodeId, kind: NodeKind) -> Result<&Node> {
        let node = self.live(id)?;
        if node.kind() != kind {
            log::debug!("node {id} is a {:?}, expected {kind:?}", node.kind());
            return Err(Error::TypeMismatch(format!(
                "expected a {}, found a {}",
                kind.node_type(),
                node.kind().node_type()
            )));
        }
        Ok(node)
    }

    fn kind_unchecked(&self, id: NodeId) -> NodeKind {
        self.pool.get(id).map_or(NodeKind::Root, Node::kind)
    }

    fn name_unchecked(&self, id: NodeId) -> Option<&str> {
        self.pool.get(id).and_then(|node| node.data.name())
    }

    /// Map a section parent handle to the config group.
    fn resolve_config(&self, parent: NodeId) -> Result<NodeId> {
        match self.live(parent)?.kind() {
            NodeKind::Root => self.config_root(),
            NodeKind::ConfigGroup => Ok(parent),
            other => {
                log::debug!("cannot add a section under {other:?} {parent}");
                Err(Error::TypeMismatch(format!(
                    "sections can only be added to the root, not to a {}",
                    other.node_type()
                )))
            }
        }
    }

    /// Parent must be live and allowed to host `child` by the legality table.
    fn check_child(&self, parent: NodeId, child: NodeKind) -> Result<()> {
        let parent_kind = self.live(parent)?.kind();
        if !parent_kind.may_parent(child) {
            log::debug!("{child:?} cannot be a child of {parent_kind:?} {parent}");
            return Err(Error::TypeMismatch(format!(
                "a {} cannot be added to a {}",
                child.node_type(),
                parent_kind.node_type()
            )));
        }
        Ok(())
    }

    /// No live child of `parent` other than `except` may be called `name`.
    pub(crate) fn ensure_unique(&self, parent: NodeId, name: &str, except: Option<NodeId>) -> Result<()> {
        let clash = self
            .pool
            .live_children(parent)
            .any(|id| Some(id) != except && self.name_unchecked(id) == Some(name));
        if clash {
            log::debug!("name {name} already used under {parent}");
            return Err(Error::Duplicate(name.to_string()));
        }
        Ok(())
    }

    /// First live SectionType under `config` carrying `type_`.
    pub(crate) fn find_section_type(&self, config: NodeId, type_: &str) -> Option<NodeId> {
        self.pool
            .live_children(config)
            .find(|&id| self.name_unchecked(id) == Some(type_))
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(node) = self.pool.get_mut(id) {
            node.parent = None;
        }
    }
}

/// Names written unquoted must survive a re-parse as a single bare word.
pub(crate) fn check_word(what: &str, text: &str) -> Result<()> {
    if uci2_syntax::lexer::is_word(text) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "{what} {text:?} must be a single unquoted word"
        )))
    }
}

/// Explicit section names are quoted on output so anything non-empty goes,
/// except the `@` prefix which marks anonymous sections.
pub(crate) fn check_section_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidArgument("section name is empty".to_string()));
    }
    if name.starts_with('@') {
        return Err(Error::InvalidArgument(format!(
            "section name {name:?} is reserved for anonymous sections"
        )));
    }
    Ok(())
}
