/// Run configuration and the input rules shared by flags and prompts.
use crate::error::ConfigError;
use crate::model::{SortDirection, SortMode};
use crate::scanner::DEFAULT_ERROR_LOG;
use std::fs;
use std::path::PathBuf;

/// Default report width in columns.
pub const DEFAULT_WIDTH: usize = 100;

/// Which breakdown tallies the report prints under each node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailFlags {
    pub category: bool,
    pub extension: bool,
    pub mimetype: bool,
}

impl DetailFlags {
    pub fn any(self) -> bool {
        self.category || self.extension || self.mimetype
    }
}

/// Everything one scan needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub max_depth: usize,
    pub sort: SortMode,
    pub direction: SortDirection,
    pub detail: DetailFlags,
    /// Trace file for scan failures. `None` disables it.
    pub error_log: Option<PathBuf>,
    pub width: usize,
}

impl ScanConfig {
    /// Name-sorted A→Z, no detail, `exceptions.log`, 100 columns.
    pub fn new(root: impl Into<PathBuf>, max_depth: usize) -> Self {
        let sort = SortMode::default();
        Self {
            root: root.into(),
            max_depth,
            sort,
            direction: sort.natural_direction(),
            detail: DetailFlags::default(),
            error_log: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
            width: DEFAULT_WIDTH,
        }
    }

    /// Check the root is an existing, listable directory and the width is
    /// usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRoot);
        }
        let meta =
            fs::metadata(&self.root).map_err(|_| ConfigError::RootNotFound(self.root.clone()))?;
        if !meta.is_dir() {
            return Err(ConfigError::RootNotDirectory(self.root.clone()));
        }
        fs::read_dir(&self.root).map_err(|_| ConfigError::RootUnreadable(self.root.clone()))?;
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(())
    }
}

/// Parse a depth typed by the user. Surrounding whitespace is ignored.
pub fn parse_max_depth(input: &str) -> Result<usize, ConfigError> {
    let trimmed = input.trim();
    if let Some(rest) = trimmed.strip_prefix('-') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::NegativeDepth(trimmed.to_string()));
        }
    }
    trimmed
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidDepth(trimmed.to_string()))
}

/// Clean up a root path typed by the user: trim whitespace and drop one
/// trailing `/`. A bare `/` is kept.
pub fn normalize_root(input: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyRoot);
    }
    let stripped = match trimmed.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => trimmed,
    };
    Ok(PathBuf::from(stripped))
}
