/// Scanner module: directory listing with fault isolation, and the
/// aggregating walk built on top of it.
///
/// Every failure is turned into an [`ErrorRecord`] at this boundary: it is
/// logged, appended to the error log and kept in order, and the caller gets
/// an empty listing (or a zero size) instead of an error. Nothing inside a
/// walk ever aborts it.
pub mod aggregate;
pub mod error_log;
pub mod lister;

pub use aggregate::{Aggregator, ScanOutcome};
pub use error_log::{ErrorLog, DEFAULT_ERROR_LOG};
pub use lister::{DirLister, FsLister, Listing};

use crate::error::ScanError;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// What a directory child is, as far as sizing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    File,
    Directory,
    /// Symlinks, sockets, devices. Never sized.
    Other,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub path: PathBuf,
    pub kind: ChildKind,
    /// Byte length for files, zero otherwise.
    pub size: u64,
}

impl ChildEntry {
    pub fn file(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            kind: ChildKind::File,
            size,
        }
    }

    pub fn directory(path: PathBuf) -> Self {
        Self {
            path,
            kind: ChildKind::Directory,
            size: 0,
        }
    }

    pub fn other(path: PathBuf) -> Self {
        Self {
            path,
            kind: ChildKind::Other,
            size: 0,
        }
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == ChildKind::File
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == ChildKind::Directory
    }
}

/// A captured failure. Immutable once recorded.
#[derive(Debug)]
pub struct ErrorRecord {
    pub path: PathBuf,
    pub error: ScanError,
    pub recorded_at: DateTime<Local>,
}

impl ErrorRecord {
    pub fn new(error: ScanError) -> Self {
        Self {
            path: error.path().to_path_buf(),
            error,
            recorded_at: Local::now(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Fault-isolating front end over a [`DirLister`].
pub struct Scanner<L: DirLister = FsLister> {
    lister: L,
    errors: Vec<ErrorRecord>,
    log: Option<ErrorLog>,
}

impl Scanner<FsLister> {
    /// Scanner over the real filesystem.
    pub fn filesystem(log: Option<ErrorLog>) -> Self {
        Self::new(FsLister, log)
    }
}

impl<L: DirLister> Scanner<L> {
    pub fn new(lister: L, log: Option<ErrorLog>) -> Self {
        Self {
            lister,
            errors: Vec::new(),
            log,
        }
    }

    /// Immediate children of `dir`, or an empty list if it cannot be read.
    pub fn list_children(&mut self, dir: &Path) -> Vec<ChildEntry> {
        match self.lister.read_children(dir) {
            Ok(listing) => {
                for failure in listing.failures {
                    self.record(failure);
                }
                listing.entries
            }
            Err(err) => {
                self.record(err);
                Vec::new()
            }
        }
    }

    /// Bytes of every file below `dir`, without classification.
    pub fn subtree_size(&mut self, dir: &Path) -> u64 {
        let mut failures = Vec::new();
        let size = self.lister.walk_size(dir, &mut failures);
        for failure in failures {
            self.record(failure);
        }
        size
    }

    /// Failures recorded so far, oldest first.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.errors
    }

    fn record(&mut self, error: ScanError) {
        warn!("{error}");
        let record = ErrorRecord::new(error);
        if let Some(log) = self.log.as_mut() {
            if let Err(err) = log.append(&record) {
                warn!("Could not write error log {}: {err}", log.path().display());
            }
        }
        self.errors.push(record);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory lister for driving the scanner without a filesystem.
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;

    #[derive(Debug, Default)]
    pub struct FakeLister {
        files: BTreeMap<PathBuf, u64>,
        dirs: BTreeSet<PathBuf>,
        denied: BTreeSet<PathBuf>,
    }

    impl FakeLister {
        pub fn new(root: &str) -> Self {
            let mut fake = Self::default();
            fake.dirs.insert(PathBuf::from(root));
            fake
        }

        /// Add a file, creating its parent directories.
        pub fn file(mut self, path: &str, size: u64) -> Self {
            let path = PathBuf::from(path);
            self.add_parents(&path);
            self.files.insert(path, size);
            self
        }

        /// Add an empty directory, creating its parents.
        pub fn dir(mut self, path: &str) -> Self {
            let path = PathBuf::from(path);
            self.add_parents(&path);
            self.dirs.insert(path);
            self
        }

        /// Make reading `path` fail with permission denied.
        pub fn deny(mut self, path: &str) -> Self {
            self.denied.insert(PathBuf::from(path));
            self
        }

        fn add_parents(&mut self, path: &Path) {
            for ancestor in path.ancestors().skip(1) {
                if ancestor.as_os_str().is_empty() || ancestor == Path::new("/") {
                    break;
                }
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    impl DirLister for FakeLister {
        fn read_children(&self, dir: &Path) -> Result<Listing, ScanError> {
            if self.denied.contains(dir) {
                return Err(ScanError::ReadDir {
                    path: dir.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::PermissionDenied),
                });
            }
            if !self.dirs.contains(dir) {
                return Err(ScanError::ReadDir {
                    path: dir.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            let is_child = |p: &Path| p.parent() == Some(dir);
            let mut entries: Vec<ChildEntry> = self
                .dirs
                .iter()
                .filter(|p| is_child(p))
                .map(|p| ChildEntry::directory(p.clone()))
                .chain(
                    self.files
                        .iter()
                        .filter(|(p, _)| is_child(p))
                        .map(|(p, &size)| ChildEntry::file(p.clone(), size)),
                )
                .collect();
            entries.sort_by(|a, b| a.path.cmp(&b.path));
            Ok(Listing {
                entries,
                failures: Vec::new(),
            })
        }
    }
}
