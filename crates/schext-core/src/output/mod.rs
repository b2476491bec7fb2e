//! Output side of an extraction: the `FileWriter` seam and the pretty JSON encoding.

mod writer;

pub use writer::FsWriter;

use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Host filesystem abstraction used by the orchestrator.
pub trait FileWriter: Send + Sync {
    /// Creates `path` and any missing parents; succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Writes `contents` to `path`, creating parent directories as needed.
    /// An existing file is replaced.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Encodes `schema` as UTF-8 JSON with 2-space indentation.
pub fn encode_pretty(schema: &Value) -> Result<Vec<u8>, FetchError> {
    Ok(serde_json::to_vec_pretty(schema)?)
}

/// Writes one schema below `root` and returns the full path written.
pub fn write_schema(
    writer: &dyn FileWriter,
    root: &Path,
    relative: &Path,
    schema: &Value,
) -> Result<PathBuf, FetchError> {
    let full = root.join(relative);
    let bytes = encode_pretty(schema)?;
    writer.write(&full, &bytes).map_err(|e| FetchError::Write {
        path: full.clone(),
        source: e,
    })?;
    Ok(full)
}
