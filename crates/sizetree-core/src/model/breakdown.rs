/// Per-directory byte accounting by category, extension and MIME type.
use crate::classify::{classify_by_category, classify_by_mimetype, extension_key, Category};
use compact_str::CompactString;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Three independent byte tallies for one directory.
///
/// Values only ever grow: files are added with [`record_file`] and
/// subdirectory tallies are folded in with [`merge`].
///
/// [`record_file`]: ClassificationBreakdown::record_file
/// [`merge`]: ClassificationBreakdown::merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationBreakdown {
    pub category: BTreeMap<Category, u64>,
    pub extension: BTreeMap<CompactString, u64>,
    pub mimetype: BTreeMap<CompactString, u64>,
}

impl ClassificationBreakdown {
    /// Count a file of `size` bytes under all three tallies.
    pub fn record_file(&mut self, path: &Path, size: u64) {
        let ext = extension_key(path);
        let category = classify_by_category(&ext);
        let mimetype = classify_by_mimetype(path);

        add(self.category.entry(category).or_default(), size);
        add(
            self.extension.entry(CompactString::new(&ext)).or_default(),
            size,
        );
        add(
            self.mimetype.entry(CompactString::new(mimetype)).or_default(),
            size,
        );
    }

    /// Add every key of `other` into `self`, key by key.
    pub fn merge(&mut self, other: &ClassificationBreakdown) {
        for (&category, &bytes) in &other.category {
            add(self.category.entry(category).or_default(), bytes);
        }
        for (ext, &bytes) in &other.extension {
            add(self.extension.entry(ext.clone()).or_default(), bytes);
        }
        for (mimetype, &bytes) in &other.mimetype {
            add(self.mimetype.entry(mimetype.clone()).or_default(), bytes);
        }
    }

    /// `true` when no file has been counted.
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.extension.is_empty() && self.mimetype.is_empty()
    }

    /// Sum of the category tally.
    pub fn category_total(&self) -> u64 {
        self.category.values().copied().fold(0, u64::saturating_add)
    }

    /// Sum of the extension tally.
    pub fn extension_total(&self) -> u64 {
        self.extension.values().copied().fold(0, u64::saturating_add)
    }

    /// Sum of the MIME type tally.
    pub fn mimetype_total(&self) -> u64 {
        self.mimetype.values().copied().fold(0, u64::saturating_add)
    }

    /// Bytes recorded for `category`, or zero.
    pub fn bytes_for(&self, category: Category) -> u64 {
        self.category.get(&category).copied().unwrap_or(0)
    }
}

#[inline]
fn add(slot: &mut u64, bytes: u64) {
    *slot = slot.saturating_add(bytes);
}
