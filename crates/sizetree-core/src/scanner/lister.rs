/// Directory listing backends.
///
/// [`DirLister`] is the seam between the walk and the filesystem: the
/// aggregator only ever sees listings and errors, so tests can drive it
/// with an in-memory lister.
use super::{ChildEntry, ChildKind};
use crate::error::ScanError;
use std::fs;
use std::path::{Path, PathBuf};

/// Immediate children of one directory plus any per-entry failures.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<ChildEntry>,
    /// Entries that could not be stat'ed. They are absent from `entries`.
    pub failures: Vec<ScanError>,
}

pub trait DirLister {
    /// List the immediate children of `dir`.
    ///
    /// Returns `Err` only when `dir` itself cannot be read.
    fn read_children(&self, dir: &Path) -> Result<Listing, ScanError>;

    /// Total bytes of regular files anywhere below `dir`.
    ///
    /// Failures are appended to `failures` in the order they occur. The
    /// default implementation walks with an explicit stack so arbitrarily
    /// deep trees cannot exhaust the call stack.
    fn walk_size(&self, dir: &Path, failures: &mut Vec<ScanError>) -> u64 {
        let mut total: u64 = 0;
        let mut stack: Vec<PathBuf> = vec![dir.to_path_buf()];

        while let Some(current) = stack.pop() {
            let listing = match self.read_children(&current) {
                Ok(listing) => listing,
                Err(err) => {
                    failures.push(err);
                    continue;
                }
            };
            failures.extend(listing.failures);
            // Reverse so children are visited in listing order.
            for entry in listing.entries.into_iter().rev() {
                match entry.kind {
                    ChildKind::File => total = total.saturating_add(entry.size),
                    ChildKind::Directory => stack.push(entry.path),
                    ChildKind::Other => {}
                }
            }
        }

        total
    }
}

/// Lists the real filesystem. Symbolic links are never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirLister for FsLister {
    fn read_children(&self, dir: &Path) -> Result<Listing, ScanError> {
        let read_dir = fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut listing = Listing::default();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(source) => {
                    listing.failures.push(ScanError::ReadDir {
                        path: dir.to_path_buf(),
                        source,
                    });
                    continue;
                }
            };
            let path = dir_entry.path();

            // DirEntry::file_type does not traverse symlinks.
            let file_type = match dir_entry.file_type() {
                Ok(t) => t,
                Err(source) => {
                    listing.failures.push(ScanError::Metadata { path, source });
                    continue;
                }
            };

            let entry = if file_type.is_file() {
                match dir_entry.metadata() {
                    Ok(meta) => ChildEntry::file(path, meta.len()),
                    Err(source) => {
                        listing.failures.push(ScanError::Metadata { path, source });
                        continue;
                    }
                }
            } else if file_type.is_dir() {
                ChildEntry::directory(path)
            } else {
                ChildEntry::other(path)
            };
            listing.entries.push(entry);
        }

        // read_dir order is filesystem-dependent; fix it so runs are repeatable.
        listing.entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(listing)
    }

    /// Serial `jwalk` walk of the whole subtree.
    fn walk_size(&self, dir: &Path, failures: &mut Vec<ScanError>) -> u64 {
        let mut total: u64 = 0;

        let walker = jwalk::WalkDir::new(dir)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(jwalk::Parallelism::Serial);

        for entry_result in walker {
            let mut entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    failures.push(ScanError::Walk {
                        path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            // jwalk reports a directory it could not list on that
            // directory's own entry, not as an `Err` item.
            if let Some(err) = entry.read_children_error.take() {
                let path = err.path().map_or_else(|| entry.path(), Path::to_path_buf);
                failures.push(ScanError::Walk {
                    path,
                    message: err.to_string(),
                });
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            match entry.metadata() {
                Ok(meta) => total = total.saturating_add(meta.len()),
                Err(err) => failures.push(ScanError::Walk {
                    path: entry.path(),
                    message: err.to_string(),
                }),
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_bytes(path: &Path, n: usize) {
        let mut f = fs::File::create(path).unwrap();
        f.write_all(&vec![0u8; n]).unwrap();
    }

    #[test]
    fn fs_lister_separates_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("b.txt"), 7);
        fs::create_dir(tmp.path().join("a_dir")).unwrap();

        let listing = FsLister.read_children(tmp.path()).unwrap();
        assert!(listing.failures.is_empty());
        assert_eq!(listing.entries.len(), 2);

        let dir = &listing.entries[0];
        assert!(dir.is_dir());
        assert_eq!(dir.path, tmp.path().join("a_dir"));

        let file = &listing.entries[1];
        assert!(file.is_file());
        assert_eq!(file.size, 7);
    }

    #[test]
    fn fs_lister_missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("gone");
        let err = FsLister.read_children(&missing).unwrap_err();
        assert!(matches!(err, ScanError::ReadDir { ref path, .. } if *path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn fs_lister_does_not_follow_symlinks() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("target");
        fs::create_dir(&target).unwrap();
        write_bytes(&target.join("big.bin"), 1_000);
        std::os::unix::fs::symlink(&target, tmp.path().join("link")).unwrap();

        let listing = FsLister.read_children(tmp.path()).unwrap();
        let link = listing
            .entries
            .iter()
            .find(|e| e.path.ends_with("link"))
            .unwrap();
        assert_eq!(link.kind, ChildKind::Other);
    }

    #[test]
    fn jwalk_and_stack_walks_agree() {
        let tmp = TempDir::new().unwrap();
        let deep = tmp.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        write_bytes(&tmp.path().join("a").join("one.bin"), 100);
        write_bytes(&deep.join("two.bin"), 250);

        struct StackOnly;
        impl DirLister for StackOnly {
            fn read_children(&self, dir: &Path) -> Result<Listing, ScanError> {
                FsLister.read_children(dir)
            }
        }

        let mut jwalk_failures = Vec::new();
        let mut stack_failures = Vec::new();
        assert_eq!(FsLister.walk_size(tmp.path(), &mut jwalk_failures), 350);
        assert_eq!(StackOnly.walk_size(tmp.path(), &mut stack_failures), 350);
        assert!(jwalk_failures.is_empty());
        assert!(stack_failures.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn jwalk_records_unlistable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        write_bytes(&locked.join("hidden.bin"), 500);
        write_bytes(&tmp.path().join("ok.bin"), 7);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut failures = Vec::new();
        let total = FsLister.walk_size(tmp.path(), &mut failures);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(total, 7);
        assert_eq!(failures.len(), 1);
        assert!(matches!(&failures[0], ScanError::Walk { path, .. } if *path == locked));
    }
}
