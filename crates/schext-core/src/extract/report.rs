//! Outcome of one extraction run.

use std::path::PathBuf;

use crate::error::EntryError;

/// A schema written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSchema {
    pub reference: String,
    /// Full path of the written file (output root joined with the derived path).
    pub path: PathBuf,
}

/// Per-run summary. Not persisted.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Written files, in manifest order.
    pub written: Vec<WrittenSchema>,
    /// Entries that failed, in manifest order.
    pub failures: Vec<EntryError>,
}

impl ExtractionReport {
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
