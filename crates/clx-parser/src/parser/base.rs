//! Node handles.

use serde::Serialize;

/// Index of a node in a `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for a missing node.
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

/// An ordered list of child nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new() -> NodeList {
        NodeList { nodes: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<Vec<NodeIndex>> for NodeList {
    fn from(nodes: Vec<NodeIndex>) -> Self {
        NodeList { nodes }
    }
}
