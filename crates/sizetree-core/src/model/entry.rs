/// Flat, walk-ordered table of directory sizes produced by the aggregator.
///
/// Entries are kept in the order they were first registered (pre-order),
/// with a path index alongside for O(1) lookup.
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One tracked directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// Bytes of every file under this directory, including folded
    /// boundary subtrees. Zero until the walk leaves the directory.
    pub total_size: u64,
    /// Levels below the scan root. The root is depth 0.
    pub depth: usize,
}

/// Ordered `path -> (size, depth)` table.
#[derive(Debug, Clone, Default)]
pub struct SizeTable {
    entries: Vec<DirectoryEntry>,
    index: HashMap<PathBuf, usize>,
}

impl SizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` with a zero placeholder size.
    ///
    /// Registering an existing path resets its size and depth but keeps
    /// its original position.
    pub fn register(&mut self, path: &Path, depth: usize) {
        self.insert(path, 0, depth);
    }

    /// Set the size and depth of `path`, registering it if unseen.
    pub fn insert(&mut self, path: &Path, total_size: u64, depth: usize) {
        if let Some(&i) = self.index.get(path) {
            let entry = &mut self.entries[i];
            entry.total_size = total_size;
            entry.depth = depth;
            return;
        }
        self.index.insert(path.to_path_buf(), self.entries.len());
        self.entries.push(DirectoryEntry {
            path: path.to_path_buf(),
            total_size,
            depth,
        });
    }

    /// Freeze the size of an already-registered path.
    /// Returns `false` if the path was never registered.
    pub fn finalize(&mut self, path: &Path, total_size: u64) -> bool {
        match self.index.get(path) {
            Some(&i) => {
                self.entries[i].total_size = total_size;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, path: &Path) -> Option<&DirectoryEntry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    /// The first entry registered at depth 0, i.e. the explicit scan root.
    pub fn root(&self) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.depth == 0)
    }

    /// The entry with the largest size; ties go to the first registered.
    pub fn largest(&self) -> Option<&DirectoryEntry> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(b) if b.total_size >= entry.total_size => Some(b),
            _ => Some(entry),
        })
    }

    /// Entries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SizeTable {
    type Item = &'a DirectoryEntry;
    type IntoIter = std::slice::Iter<'a, DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
