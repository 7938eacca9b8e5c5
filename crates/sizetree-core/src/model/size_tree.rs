/// Arena-backed directory tree rebuilt from the flat size table.
///
/// All nodes live in a single `Vec<TreeNode>`. Relationships between nodes
/// use `NodeIndex` rather than heap pointers, and every parent keys its
/// children by name so that reconstruction is one hash lookup per segment.
use super::breakdown::ClassificationBreakdown;
use super::entry::SizeTable;
use super::tree_node::{NodeIndex, TreeNode};
use crate::error::TreeError;
use compact_str::CompactString;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// The nested tree produced from one scan.
#[derive(Debug, Clone)]
pub struct SizeTree {
    /// Arena: every node in a flat vector. The root is always index 0.
    pub(crate) nodes: Vec<TreeNode>,

    /// Absolute (or caller-relative) path of the root directory.
    root_path: PathBuf,
}

impl SizeTree {
    /// Create a tree holding only a root node.
    pub fn with_root(root_path: PathBuf, size: u64, detail: ClassificationBreakdown) -> Self {
        let name = root_display_name(&root_path);
        Self {
            nodes: vec![TreeNode::new(name, size, detail, None)],
            root_path,
        }
    }

    /// Rebuild the nested tree from a flat size table.
    ///
    /// The root is the table's depth-0 entry, falling back to the largest
    /// entry when no depth-0 entry exists. Every other entry below the root
    /// path becomes reachable through exactly one chain of child links;
    /// intermediate directories missing from the walk order are created on
    /// demand. Entries outside the root path are skipped.
    pub fn build(
        table: &SizeTable,
        breakdowns: &HashMap<PathBuf, ClassificationBreakdown>,
    ) -> Result<Self, TreeError> {
        let root_entry = table
            .root()
            .or_else(|| table.largest())
            .ok_or(TreeError::EmptyTable)?;
        let root_path = root_entry.path.clone();
        let detail_for = |path: &Path| breakdowns.get(path).cloned().unwrap_or_default();

        let mut tree = Self::with_root(
            root_path.clone(),
            root_entry.total_size,
            detail_for(&root_path),
        );

        for entry in table {
            if entry.path == root_path {
                continue;
            }
            let Ok(relative) = entry.path.strip_prefix(&root_path) else {
                debug!(
                    "Skipping {}: not under root {}",
                    entry.path.display(),
                    root_path.display()
                );
                continue;
            };

            let mut current_path = root_path.clone();
            let mut node = tree.root();
            let mut segments = 0usize;
            for component in relative.components() {
                let Component::Normal(segment) = component else {
                    continue;
                };
                segments += 1;
                current_path.push(segment);
                node = match tree.child_by_name(node, segment) {
                    Some(existing) => existing,
                    None => {
                        let size = table.get(&current_path).map_or(0, |e| e.total_size);
                        let child =
                            TreeNode::from_segment(segment, size, detail_for(&current_path), None);
                        tree.add_child(node, child)
                    }
                };
            }

            if segments > 0 {
                tree.nodes[node.idx()].size = entry.total_size;
            }
        }

        Ok(tree)
    }

    /// Append `child` under `parent`, keyed by its raw segment.
    ///
    /// If `parent` already has a child with that segment the existing index
    /// is returned and `child` is dropped.
    pub fn add_child(&mut self, parent: NodeIndex, mut child: TreeNode) -> NodeIndex {
        if let Some(existing) = self.child_by_name(parent, &child.segment) {
            return existing;
        }
        let idx = NodeIndex::new(self.nodes.len());
        child.parent = Some(parent);
        let segment = child.segment.clone();
        self.nodes.push(child);
        let parent_node = &mut self.nodes[parent.idx()];
        parent_node.children.push(idx);
        parent_node.child_names.insert(segment, idx);
        idx
    }

    /// Look up a direct child of `parent` by its exact path segment.
    pub fn child_by_name(
        &self,
        parent: NodeIndex,
        name: impl AsRef<OsStr>,
    ) -> Option<NodeIndex> {
        self.nodes
            .get(parent.idx())
            .and_then(|p| p.child_names.get(name.as_ref()).copied())
    }

    /// Index of the root node.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Path the tree was rooted at.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Get the node at the given index, if it exists.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(index.idx())
    }

    /// Get the node at the given index.
    ///
    /// Panics on an index that did not come from this tree.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.idx()]
    }

    /// Children of `index` in their current order.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index).map_or(&[], |n| n.children())
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order `(node, depth)` listing following current child order.
    ///
    /// Iterative, so report rendering never recurses.
    pub fn preorder(&self) -> Vec<(NodeIndex, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            out.push((idx, depth));
            for &child in self.children(idx).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// Reconstruct the full path of a node by walking up to the root.
    pub fn full_path(&self, index: NodeIndex) -> PathBuf {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            let Some(node) = self.get(idx) else { break };
            if node.parent.is_none() {
                break;
            }
            segments.push(node.segment.as_os_str());
            current = node.parent;
        }
        segments.reverse();

        let mut path = self.root_path.clone();
        path.extend(segments);
        path
    }

    /// Flatten the tree back into a walk-ordered size table.
    pub fn to_size_table(&self) -> SizeTable {
        let mut table = SizeTable::new();
        for (idx, depth) in self.preorder() {
            table.insert(&self.full_path(idx), self.node(idx).size, depth);
        }
        table
    }
}

/// Display name for the tree root: its last segment, or the whole path
/// for `/` and similar segment-less roots.
fn root_display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}
