/// Depth-bounded aggregating walk.
///
/// The walk is depth-first: a directory's entry is registered when the walk
/// enters it and its size is frozen when the walk leaves it. Directories up
/// to `max_depth` levels below the root get their own table entry and
/// breakdown; anything deeper is only sized, through the scanner's
/// size-only walk, and folded into the nearest tracked ancestor.
///
/// Every tracked directory stores a breakdown (possibly empty), and a
/// parent always merges its child's breakdown after the child returns, so
/// a parent's tallies include every classified byte beneath it.
use super::lister::{DirLister, FsLister};
use super::{ChildKind, ErrorLog, ErrorRecord, Scanner};
use crate::error::TreeError;
use crate::model::{ClassificationBreakdown, SizeTable, SizeTree};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Everything one walk produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Tracked directories in walk order.
    pub table: SizeTable,
    /// Breakdown per tracked directory, keyed by path.
    pub breakdowns: HashMap<PathBuf, ClassificationBreakdown>,
    /// Failures in the order they happened.
    pub errors: Vec<ErrorRecord>,
}

impl ScanOutcome {
    /// Total bytes under the scan root, or zero for an empty outcome.
    pub fn root_size(&self) -> u64 {
        self.table.root().map_or(0, |e| e.total_size)
    }

    pub fn breakdown(&self, path: &Path) -> Option<&ClassificationBreakdown> {
        self.breakdowns.get(path)
    }

    /// Rebuild the nested tree from this outcome.
    pub fn build_tree(&self) -> Result<SizeTree, TreeError> {
        SizeTree::build(&self.table, &self.breakdowns)
    }
}

pub struct Aggregator<L: DirLister = FsLister> {
    scanner: Scanner<L>,
    max_depth: usize,
    table: SizeTable,
    breakdowns: HashMap<PathBuf, ClassificationBreakdown>,
}

impl Aggregator<FsLister> {
    /// Aggregator over the real filesystem.
    pub fn filesystem(max_depth: usize, error_log: Option<PathBuf>) -> Self {
        Self::new(Scanner::filesystem(error_log.map(ErrorLog::new)), max_depth)
    }
}

impl<L: DirLister> Aggregator<L> {
    pub fn new(scanner: Scanner<L>, max_depth: usize) -> Self {
        Self {
            scanner,
            max_depth,
            table: SizeTable::new(),
            breakdowns: HashMap::new(),
        }
    }

    /// Walk `root` and hand back the accumulated tables.
    pub fn run(mut self, root: &Path) -> ScanOutcome {
        let start = Instant::now();
        info!(
            "Scanning {} (max depth {})",
            root.display(),
            self.max_depth
        );

        self.table.register(root, 0);
        let total = self.visit(root, 0);

        let errors = self.scanner.into_errors();
        info!(
            "Scan complete: {} bytes in {} tracked directories, {} errors, {:?}",
            total,
            self.table.len(),
            errors.len(),
            start.elapsed()
        );

        ScanOutcome {
            table: self.table,
            breakdowns: self.breakdowns,
            errors,
        }
    }

    /// Size and classify `dir`, which is already registered at `depth`.
    /// Returns the directory's total bytes.
    fn visit(&mut self, dir: &Path, depth: usize) -> u64 {
        let mut total: u64 = 0;
        let mut detail = ClassificationBreakdown::default();

        for child in self.scanner.list_children(dir) {
            match child.kind {
                ChildKind::File => {
                    total = total.saturating_add(child.size);
                    detail.record_file(&child.path, child.size);
                }
                ChildKind::Directory if depth < self.max_depth => {
                    self.table.register(&child.path, depth + 1);
                    let subtotal = self.visit(&child.path, depth + 1);
                    total = total.saturating_add(subtotal);
                    if let Some(child_detail) = self.breakdowns.get(&child.path) {
                        detail.merge(child_detail);
                    }
                }
                ChildKind::Directory => {
                    let folded = self.scanner.subtree_size(&child.path);
                    debug!(
                        "Folded {} bytes from {} past the depth limit",
                        folded,
                        child.path.display()
                    );
                    total = total.saturating_add(folded);
                }
                ChildKind::Other => {}
            }
        }

        self.table.finalize(dir, total);
        self.breakdowns.insert(dir.to_path_buf(), detail);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::scanner::testing::FakeLister;

    fn run(fake: FakeLister, max_depth: usize) -> ScanOutcome {
        Aggregator::new(Scanner::new(fake, None), max_depth).run(Path::new("/r"))
    }

    /// r/a.txt (10), r/sub/b.mp4 (20)
    fn scenario() -> FakeLister {
        FakeLister::new("/r")
            .file("/r/a.txt", 10)
            .file("/r/sub/b.mp4", 20)
    }

    #[test]
    fn tracked_subdirectory_is_classified_and_merged() {
        let outcome = run(scenario(), 10);

        assert_eq!(outcome.root_size(), 30);
        let root = outcome.breakdown(Path::new("/r")).unwrap();
        assert_eq!(root.bytes_for(Category::Document), 10);
        assert_eq!(root.bytes_for(Category::Video), 20);
        assert_eq!(root.category.len(), 2);

        let sub = outcome.table.get(Path::new("/r/sub")).unwrap();
        assert_eq!((sub.total_size, sub.depth), (20, 1));
    }

    #[test]
    fn depth_zero_folds_subdirectories_without_detail() {
        let outcome = run(scenario(), 0);

        assert_eq!(outcome.root_size(), 30);
        assert_eq!(outcome.table.len(), 1);
        let root = outcome.breakdown(Path::new("/r")).unwrap();
        assert_eq!(root.bytes_for(Category::Document), 10);
        assert_eq!(root.bytes_for(Category::Video), 0);
        assert_eq!(root.category_total(), 10);
        assert!(outcome.breakdown(Path::new("/r/sub")).is_none());
    }

    /// Directories at exactly `max_depth` are tracked and classify their own
    /// files; their subdirectories are folded.
    #[test]
    fn boundary_directory_tracks_only_direct_files() {
        let fake = FakeLister::new("/r")
            .file("/r/a/one.rs", 4)
            .file("/r/a/deeper/two.png", 6)
            .file("/r/a/deeper/still/three.iso", 8);
        let outcome = run(fake, 1);

        assert_eq!(outcome.root_size(), 18);
        let a = outcome.table.get(Path::new("/r/a")).unwrap();
        assert_eq!(a.total_size, 18);
        assert!(outcome.table.get(Path::new("/r/a/deeper")).is_none());

        let a_detail = outcome.breakdown(Path::new("/r/a")).unwrap();
        assert_eq!(a_detail.category_total(), 4);
        assert_eq!(a_detail.bytes_for(Category::SourceCode), 4);
    }

    fn five_levels() -> FakeLister {
        FakeLister::new("/r")
            .file("/r/x.bin", 1)
            .file("/r/a/y.bin", 2)
            .file("/r/a/b/z.bin", 4)
            .file("/r/a/b/c/w.bin", 8)
            .file("/r/d/v.bin", 16)
    }

    #[test]
    fn root_size_is_depth_independent() {
        for depth in 0..6 {
            assert_eq!(run(five_levels(), depth).root_size(), 31, "max_depth {depth}");
        }
        assert_eq!(run(five_levels(), 100).table.len(), 5);
    }

    /// At a leaf the tallies equal the direct-file bytes; higher up they
    /// equal the directory total when nothing was folded.
    #[test]
    fn breakdown_totals_match_sizes() {
        let fake = FakeLister::new("/r")
            .file("/r/top.md", 3)
            .file("/r/a/one.c", 5)
            .file("/r/a/b/two.mp3", 7)
            .file("/r/a/b/three", 11);
        let outcome = run(fake, 10);

        for entry in &outcome.table {
            let detail = outcome.breakdown(&entry.path).unwrap();
            assert_eq!(detail.category_total(), entry.total_size, "{:?}", entry.path);
            assert_eq!(detail.extension_total(), entry.total_size);
            assert_eq!(detail.mimetype_total(), entry.total_size);
        }
    }

    #[test]
    fn unreadable_directory_contributes_nothing() {
        let fake = FakeLister::new("/r")
            .file("/r/ok/a.txt", 10)
            .file("/r/locked/secret.txt", 1_000)
            .deny("/r/locked");
        let outcome = run(fake, 10);

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].path, PathBuf::from("/r/locked"));
        assert_eq!(outcome.root_size(), 10);
        let locked = outcome.table.get(Path::new("/r/locked")).unwrap();
        assert_eq!(locked.total_size, 0);
        assert_eq!(outcome.table.get(Path::new("/r/ok")).unwrap().total_size, 10);
    }

    /// `ScanConfig::validate` rejects an unlistable root before the walk.
    /// A root that stops being listable afterwards is still only recorded.
    #[test]
    fn root_denied_mid_run_yields_empty_root_entry() {
        let outcome = run(FakeLister::new("/r").deny("/r"), 3);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.table.len(), 1);
        assert_eq!(outcome.root_size(), 0);
    }

    #[test]
    fn empty_subdirectories_are_tracked_with_empty_detail() {
        let outcome = run(FakeLister::new("/r").dir("/r/empty"), 2);
        assert_eq!(outcome.table.len(), 2);
        assert!(outcome.breakdown(Path::new("/r/empty")).unwrap().is_empty());
        assert!(outcome.breakdown(Path::new("/r")).unwrap().is_empty());
    }

    #[test]
    fn walk_order_is_preorder() {
        let fake = FakeLister::new("/r")
            .dir("/r/a/inner")
            .dir("/r/b");
        let outcome = run(fake, 5);
        let order: Vec<_> = outcome.table.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            order,
            vec![
                PathBuf::from("/r"),
                PathBuf::from("/r/a"),
                PathBuf::from("/r/a/inner"),
                PathBuf::from("/r/b"),
            ]
        );
    }
}
