/// Error types for the SizeTree engine.
///
/// Scan failures never abort a walk: they are captured as [`ScanError`]
/// values inside `ErrorRecord`s. Only configuration and tree-construction
/// problems surface through [`Error`].
use crate::model::NodeIndex;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure localised to one directory or file during the walk.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read metadata of {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk failed under {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },
}

impl ScanError {
    /// The path the failure was observed on.
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadDir { path, .. } | Self::Metadata { path, .. } | Self::Walk { path, .. } => {
                path
            }
        }
    }
}

/// Structural problems with a size table or built tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("size table is empty, nothing to build")]
    EmptyTable,

    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeIndex),

    #[error("node {parent:?} lists missing child {child:?}")]
    DanglingChild { parent: NodeIndex, child: NodeIndex },
}

/// Invalid run configuration. The run stops before scanning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maximum depth must not be negative (got {0})")]
    NegativeDepth(String),

    #[error("maximum depth must be a whole number (got {0:?})")]
    InvalidDepth(String),

    #[error("no directory path given")]
    EmptyRoot,

    #[error("{} does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("directory {} cannot be listed", .0.display())]
    RootUnreadable(PathBuf),

    #[error("report width must be at least 1 column")]
    ZeroWidth,
}

/// Crate-level error returned by [`crate::scan`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, Error>;
