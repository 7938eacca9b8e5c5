/// A single directory node in the arena-allocated size tree.
///
/// Nodes are stored in a flat `Vec<TreeNode>` and refer to each other by
/// [`NodeIndex`]. Each node also keys its children by their raw path
/// segment so the builder can find an existing child without rescanning the
/// child list, even when two names only differ in bytes that are not UTF-8.
use super::breakdown::ClassificationBreakdown;
use compact_str::CompactString;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// Lightweight index into the arena `Vec<TreeNode>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One directory in the reconstructed tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Last path segment for display, lossily converted to UTF-8.
    pub name: CompactString,

    /// Last path segment exactly as the filesystem reported it. Full paths
    /// are rebuilt from these by walking `parent`.
    pub segment: OsString,

    /// Total bytes under this directory, copied from its `DirectoryEntry`.
    pub size: u64,

    /// Classification breakdown for this directory's path, or empty.
    pub detail: ClassificationBreakdown,

    /// Index of the parent node. `None` for the root.
    pub parent: Option<NodeIndex>,

    /// Ordered child list. Insertion order until a sort pass runs.
    pub(crate) children: Vec<NodeIndex>,

    /// Raw segment -> child lookup. Never reordered.
    pub(crate) child_names: HashMap<OsString, NodeIndex>,
}

impl TreeNode {
    pub fn new(
        name: CompactString,
        size: u64,
        detail: ClassificationBreakdown,
        parent: Option<NodeIndex>,
    ) -> Self {
        let segment = OsString::from(name.as_str());
        Self::with_segment(segment, name, size, detail, parent)
    }

    /// Node for a raw path segment. The display name is derived from it.
    pub fn from_segment(
        segment: &OsStr,
        size: u64,
        detail: ClassificationBreakdown,
        parent: Option<NodeIndex>,
    ) -> Self {
        let name = CompactString::new(segment.to_string_lossy());
        Self::with_segment(segment.to_os_string(), name, size, detail, parent)
    }

    fn with_segment(
        segment: OsString,
        name: CompactString,
        size: u64,
        detail: ClassificationBreakdown,
        parent: Option<NodeIndex>,
    ) -> Self {
        Self {
            name,
            segment,
            size,
            detail,
            parent,
            children: Vec::new(),
            child_names: HashMap::new(),
        }
    }

    /// Children in their current order.
    #[inline]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
