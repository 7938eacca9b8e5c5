/// Data model for SizeTree.
///
/// The flat size table and per-directory breakdowns produced by a walk,
/// and the arena-allocated tree rebuilt from them.
pub mod breakdown;
pub mod entry;
pub mod size;
pub mod size_tree;
pub mod sort;
pub mod tree_node;

pub use breakdown::ClassificationBreakdown;
pub use entry::{DirectoryEntry, SizeTable};
pub use size_tree::SizeTree;
pub use sort::{SortDirection, SortMode};
pub use tree_node::{NodeIndex, TreeNode};
