//! Error taxonomy for extraction runs.
//!
//! `RunError` aborts a whole run before anything is written. `EntryError`
//! is scoped to one schema reference and never stops its siblings.

use std::path::PathBuf;

/// Failure that aborts the run before any filesystem mutation.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("no workspace directory: {0}")]
    NoWorkspace(String),

    #[error("invalid manifest URI {uri}: only http, https and file are supported")]
    InvalidManifestUri { uri: String },

    #[error("could not load manifest from {location}: {reason}")]
    ManifestUnavailable { location: String, reason: String },

    #[error("no schemas found in manifest {location}")]
    EmptyManifest { location: String },

    #[error("invalid release list {location}: {reason}")]
    InvalidReleaseList { location: String, reason: String },

    #[error("release {name:?} not found in release list")]
    ReleaseNotFound { name: String },

    #[error("release {name:?} requested but no release list is configured")]
    NoReleaseList { name: String },

    #[error("{reference} is not listed in manifest {location}")]
    NotInManifest { reference: String, location: String },

    #[error("could not create output directory {}: {source}", path.display())]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure scoped to a single schema reference.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("failed to extract {reference}: {cause}")]
    ExtractionFailed {
        reference: String,
        #[source]
        cause: FetchError,
    },

    #[error("cannot derive an output path for {reference}: {reason}")]
    UnresolvablePath { reference: String, reason: String },
}

impl EntryError {
    /// The schema reference this failure belongs to.
    pub fn reference(&self) -> &str {
        match self {
            EntryError::ExtractionFailed { reference, .. }
            | EntryError::UnresolvablePath { reference, .. } => reference,
        }
    }
}

/// Low-level cause of a failed fetch, parse or write.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("unsupported scheme {scheme:?} (expected http, https, file or vscode)")]
    UnsupportedScheme { scheme: String },

    #[error("invalid URI {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no document available for {uri}")]
    MissingDocument { uri: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker task failed: {reason}")]
    TaskFailed { reason: String },
}
