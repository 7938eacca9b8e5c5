/// Recursive child ordering for a [`SizeTree`].
use super::size_tree::SizeTree;
use super::tree_node::{NodeIndex, TreeNode};
use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// Key the children of every node are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Name,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortMode {
    /// Names read A→Z, sizes largest first.
    pub fn natural_direction(self) -> SortDirection {
        match self {
            Self::Name => SortDirection::Ascending,
            Self::Size => SortDirection::Descending,
        }
    }
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[inline]
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl SizeTree {
    /// Order children by size under `from`, recursively. Ties keep their
    /// current relative order.
    pub fn sort_by_size(
        &mut self,
        from: NodeIndex,
        direction: SortDirection,
    ) -> Result<(), TreeError> {
        self.sort_subtree(from, |a, b| direction.apply(a.size.cmp(&b.size)))
    }

    /// Order children by name under `from`, recursively.
    pub fn sort_by_name(
        &mut self,
        from: NodeIndex,
        direction: SortDirection,
    ) -> Result<(), TreeError> {
        self.sort_subtree(from, |a, b| direction.apply(a.name.cmp(&b.name)))
    }

    /// Sort the whole tree by `mode`.
    pub fn sort(&mut self, mode: SortMode, direction: SortDirection) -> Result<(), TreeError> {
        let root = self.root();
        match mode {
            SortMode::Name => self.sort_by_name(root, direction),
            SortMode::Size => self.sort_by_size(root, direction),
        }
    }

    /// Stable sort of every child list reachable from `from`.
    ///
    /// A node whose child list points outside the arena is reported and left
    /// untouched along with its subtree; every other subtree is still sorted.
    /// The first such problem is returned once the pass completes.
    fn sort_subtree<F>(&mut self, from: NodeIndex, compare: F) -> Result<(), TreeError>
    where
        F: Fn(&TreeNode, &TreeNode) -> Ordering,
    {
        if from.idx() >= self.nodes.len() {
            return Err(TreeError::UnknownNode(from));
        }

        let len = self.nodes.len();
        let mut first_error = None;
        let mut stack = vec![from];

        while let Some(idx) = stack.pop() {
            let dangling = self.nodes[idx.idx()]
                .children
                .iter()
                .copied()
                .find(|c| c.idx() >= len);
            if let Some(child) = dangling {
                warn!("Cannot sort below node {idx:?}: child {child:?} is missing");
                first_error.get_or_insert(TreeError::DanglingChild { parent: idx, child });
                continue;
            }

            let mut children = std::mem::take(&mut self.nodes[idx.idx()].children);
            children.sort_by(|a, b| compare(&self.nodes[a.idx()], &self.nodes[b.idx()]));
            stack.extend(children.iter().copied());
            self.nodes[idx.idx()].children = children;
        }

        first_error.map_or(Ok(()), Err)
    }
}
