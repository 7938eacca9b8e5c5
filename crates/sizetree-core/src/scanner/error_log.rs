/// Plain-text trace file for scan failures.
///
/// The file is truncated by the first failure of a run and appended to by
/// every later one, so it only ever describes the most recent run that hit
/// an error. Runs without failures leave it untouched.
use super::ErrorRecord;
use std::error::Error as _;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default trace file name, relative to the working directory.
pub const DEFAULT_ERROR_LOG: &str = "exceptions.log";

#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    /// Set once the file has been truncated for this run.
    started: bool,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            started: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one failure entry: a timestamped headline followed by the
    /// indented cause chain.
    pub fn append(&mut self, record: &ErrorRecord) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.create(true);
        if self.started {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let mut file = options.open(&self.path)?;
        self.started = true;

        writeln!(
            file,
            "[{}] {}",
            record.recorded_at.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.error
        )?;
        writeln!(file, "    path: {}", record.path.display())?;
        let mut source = record.error.source();
        while let Some(cause) = source {
            writeln!(file, "    caused by: {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use std::fs;
    use tempfile::TempDir;

    fn record(path: &str) -> ErrorRecord {
        ErrorRecord::new(ScanError::ReadDir {
            path: PathBuf::from(path),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
    }

    #[test]
    fn first_failure_truncates_then_appends() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("exceptions.log");
        fs::write(&log_path, "stale contents from an earlier run\n").unwrap();

        let mut log = ErrorLog::new(&log_path);
        log.append(&record("/one")).unwrap();
        log.append(&record("/two")).unwrap();

        let text = fs::read_to_string(&log_path).unwrap();
        assert!(!text.contains("stale contents"));
        let one = text.find("path: /one").unwrap();
        let two = text.find("path: /two").unwrap();
        assert!(one < two, "entries must keep occurrence order");
        assert_eq!(text.matches("caused by:").count(), 2);
    }

    #[test]
    fn unwritable_log_reports_io_error() {
        let tmp = TempDir::new().unwrap();
        let mut log = ErrorLog::new(tmp.path().join("no_such_dir").join("x.log"));
        assert!(log.append(&record("/one")).is_err());
    }
}
