//! Release list: named pointers to manifests, e.g.
//! `[{"name": "1.90.0", "url": "https://.../1.90.0.json"}]`.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use super::{read_location, LocationError};
use crate::error::RunError;
use crate::fetch::HttpClient;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub name: String,
    /// Manifest location for this release.
    pub url: String,
}

/// Loads the release list at `location` (same location rules as the manifest).
pub fn load_releases(
    location: &str,
    workspace: &Path,
    http: &dyn HttpClient,
) -> Result<Vec<Release>, RunError> {
    let invalid = |reason: String| RunError::InvalidReleaseList {
        location: location.to_string(),
        reason,
    };

    tracing::info!(location, "loading release list");
    let bytes = read_location(location, workspace, http).map_err(|e| match e {
        LocationError::UnsupportedScheme => {
            invalid("only http, https and file are supported".to_string())
        }
        LocationError::Unavailable(reason) => invalid(reason),
    })?;

    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| invalid(format!("invalid JSON: {}", e)))?;
    let items = value
        .as_array()
        .ok_or_else(|| invalid("expected a JSON array of releases".to_string()))?;
    if items.is_empty() {
        return Err(invalid("no releases found in list".to_string()));
    }

    let releases: Vec<Release> =
        serde_json::from_value(value).map_err(|e| invalid(format!("bad release entry: {}", e)))?;
    tracing::debug!(count = releases.len(), "release list loaded");
    Ok(releases)
}

/// Finds a release by exact name.
pub fn find_release<'a>(releases: &'a [Release], name: &str) -> Result<&'a Release, RunError> {
    releases
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| RunError::ReleaseNotFound {
            name: name.to_string(),
        })
}
