//! Filesystem-backed document reader.
//!
//! Virtual documents (`vscode://schemas/<path>`) are looked up in a schema
//! store directory as `<path>.json`, then `<path>`. Local documents resolve
//! against the workspace.

use std::io;
use std::path::{Component, Path, PathBuf};

use super::{Document, DocumentReader};
use crate::error::FetchError;
use crate::source::{VIRTUAL_AUTHORITY, VIRTUAL_SCHEME};

#[derive(Debug, Clone)]
pub struct FsDocumentReader {
    schema_store: PathBuf,
    workspace: PathBuf,
}

impl FsDocumentReader {
    pub fn new(schema_store: impl Into<PathBuf>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            schema_store: schema_store.into(),
            workspace: workspace.into(),
        }
    }

    fn open_virtual(&self, path: &str) -> Result<String, FetchError> {
        let uri = format!("{}://{}/{}", VIRTUAL_SCHEME, VIRTUAL_AUTHORITY, path);
        let relative = Path::new(path);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(FetchError::MissingDocument { uri });
        }

        let candidates = [
            self.schema_store.join(format!("{}.json", path)),
            self.schema_store.join(relative),
        ];
        for candidate in &candidates {
            match std::fs::read_to_string(candidate) {
                Ok(text) => return Ok(text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(FetchError::Read {
                        path: candidate.clone(),
                        source: e,
                    })
                }
            }
        }
        Err(FetchError::MissingDocument { uri })
    }

    fn open_local(&self, path: &Path) -> Result<String, FetchError> {
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        };
        std::fs::read_to_string(&full).map_err(|e| FetchError::Read {
            path: full,
            source: e,
        })
    }
}

impl DocumentReader for FsDocumentReader {
    fn open_text(&self, document: Document<'_>) -> Result<String, FetchError> {
        match document {
            Document::Virtual(path) => self.open_virtual(path),
            Document::Local(path) => self.open_local(path),
        }
    }
}
