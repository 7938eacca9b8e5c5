/// SizeTree Core: depth-limited disk usage measurement and classification.
///
/// This crate contains all scanning, aggregation and reporting logic with no
/// terminal or argument-parsing dependencies.
///
/// # Modules
///
/// - [`classify`]: Extension → category and path → MIME type mapping.
/// - [`config`]: Run configuration and input validation.
/// - [`error`]: Error taxonomy for scans, trees and configuration.
/// - [`model`]: Size table, breakdowns and the arena-allocated size tree.
/// - [`report`]: Text, JSON and CSV rendering.
/// - [`scanner`]: Fault-isolating directory listing and the aggregating walk.
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod scanner;

use crate::config::ScanConfig;
use crate::model::{SizeTable, SizeTree};
use crate::scanner::{Aggregator, ErrorRecord};

/// Result of a complete run: the sorted tree, the flat table it was built
/// from and every failure recorded along the way.
#[derive(Debug)]
pub struct ScanReport {
    pub tree: SizeTree,
    pub table: SizeTable,
    pub errors: Vec<ErrorRecord>,
}

impl ScanReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Validate `config`, walk the filesystem, build the tree and sort it.
///
/// Unreadable directories never fail the run; they show up in
/// [`ScanReport::errors`] and in the configured error log.
pub fn scan(config: &ScanConfig) -> error::Result<ScanReport> {
    config.validate()?;

    let outcome =
        Aggregator::filesystem(config.max_depth, config.error_log.clone()).run(&config.root);
    let mut tree = outcome.build_tree()?;
    tree.sort(config.sort, config.direction)?;

    Ok(ScanReport {
        tree,
        table: outcome.table,
        errors: outcome.errors,
    })
}
