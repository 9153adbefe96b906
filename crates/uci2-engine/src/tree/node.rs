use std::fmt;

/// Handle to a node in a [`Document`](crate::Document).
///
/// Handles are plain indices into the document's pool. They stay valid for
/// the lifetime of the document, including after the node is removed, and
/// are meaningless for any other document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    ConfigGroup,
    SectionType,
    SectionName,
    Option,
    List,
    ListItem,
}

impl NodeKind {
    /// The parent/child legality table. Nothing else in the crate decides
    /// which node may hang under which.
    pub fn may_parent(self, child: NodeKind) -> bool {
        use NodeKind as K;
        matches!(
            (self, child),
            (K::Root, K::ConfigGroup)
                | (K::ConfigGroup, K::SectionType)
                | (K::SectionType, K::SectionName)
                | (K::SectionType | K::SectionName, K::Option | K::List)
                | (K::List, K::ListItem)
        )
    }

    /// The kind as seen by callers: the two root levels fold into `Root`,
    /// a section's type and name nodes fold into `Section`.
    pub fn node_type(self) -> NodeType {
        match self {
            NodeKind::Root | NodeKind::ConfigGroup => NodeType::Root,
            NodeKind::SectionType | NodeKind::SectionName => NodeType::Section,
            NodeKind::Option => NodeType::Option,
            NodeKind::List => NodeType::List,
            NodeKind::ListItem => NodeType::ListElement,
        }
    }
}

/// Caller-visible node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Section,
    Option,
    List,
    ListElement,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Root => "root",
            NodeType::Section => "section",
            NodeType::Option => "option",
            NodeType::List => "list",
            NodeType::ListElement => "list element",
        };
        f.write_str(name)
    }
}

/// Per-role payload. Fields are optional so that reading an attribute that
/// was never set can be told apart from reading an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root,
    ConfigGroup,
    SectionType {
        name: Option<String>,
        anonymous_count: usize,
    },
    SectionName {
        name: Option<String>,
    },
    Option {
        name: Option<String>,
        value: Option<String>,
    },
    List {
        name: Option<String>,
    },
    ListItem {
        value: Option<String>,
    },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Root => NodeKind::Root,
            NodeData::ConfigGroup => NodeKind::ConfigGroup,
            NodeData::SectionType { .. } => NodeKind::SectionType,
            NodeData::SectionName { .. } => NodeKind::SectionName,
            NodeData::Option { .. } => NodeKind::Option,
            NodeData::List { .. } => NodeKind::List,
            NodeData::ListItem { .. } => NodeKind::ListItem,
        }
    }

    /// The identity-bearing name, the one sibling uniqueness is checked on.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeData::SectionType { name, .. }
            | NodeData::SectionName { name }
            | NodeData::Option { name, .. }
            | NodeData::List { name } => name.as_deref(),
            NodeData::Root | NodeData::ConfigGroup | NodeData::ListItem { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            NodeData::Option { value, .. } | NodeData::ListItem { value } => value.as_deref(),
            _ => None,
        }
    }
}

/// One slot in the pool.
///
/// `parent == None` on anything but the root means the node was removed.
/// Its id stays in the old parent's `children` and is skipped on every walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}
