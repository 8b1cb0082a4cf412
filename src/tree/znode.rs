use std::collections::HashMap;

/// Node category. Ephemeral nodes are leaves owned by the session that
/// created them and disappear when that session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Standard,
    Ephemeral,
}

/// A node in the namespace. Owned exclusively by [`ZNodeDb`](super::ZNodeDb);
/// nothing outside the store's lock ever holds a reference to one.
#[derive(Debug)]
pub(crate) struct ZNode {
    /// Last path component, including any synthesized sequential suffix.
    pub name: String,
    /// Client payload, kilobyte-scale.
    pub data: Vec<u8>,
    /// Bumped on every successful SetData. The root carries the -1 sentinel.
    pub version: i64,
    pub node_type: NodeType,
    /// Session that created the node; meaningful only for ephemerals.
    pub creator: String,
    pub children: HashMap<String, ZNode>,
    /// Suffix for the next SEQUENTIAL child; advances only when a sequential
    /// create succeeds on this node.
    pub next_sequential: u64,
}

impl ZNode {
    pub(crate) fn new(
        name: impl Into<String>,
        node_type: NodeType,
        creator: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            data,
            version: 0,
            node_type,
            creator: creator.into(),
            children: HashMap::new(),
            next_sequential: 0,
        }
    }

    /// The always-present root: empty name, version sentinel -1, standard.
    pub(crate) fn root() -> Self {
        let mut node = Self::new("", NodeType::Standard, "", Vec::new());
        node.version = -1;
        node
    }
}

/// Stable copy of one node handed out by the store. Snapshots, never
/// handles: mutating the tree after a view is taken does not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    /// Full path of the node.
    pub path: String,
    /// Last path component.
    pub name: String,
    pub data: Vec<u8>,
    pub version: i64,
    pub node_type: NodeType,
    pub creator: String,
    /// Direct-child names at snapshot time; order unspecified.
    pub children: Vec<String>,
}

impl NodeView {
    pub(crate) fn snapshot(
        node: &ZNode,
        path: String,
    ) -> Self {
        Self {
            path,
            name: node.name.clone(),
            data: node.data.clone(),
            version: node.version,
            node_type: node.node_type,
            creator: node.creator.clone(),
            children: node.children.keys().cloned().collect(),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.node_type == NodeType::Ephemeral
    }
}
