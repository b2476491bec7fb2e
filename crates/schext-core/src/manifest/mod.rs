//! Manifest loading: fetch or read the manifest, migrate legacy fields,
//! validate that it lists at least one schema.

mod parse;
pub mod releases;

pub use releases::{find_release, load_releases, Release};

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::RunError;
use crate::fetch::HttpClient;
use crate::workspace::resolve_in;

/// Schema locations listed by a manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub version: String,
    /// URIs under the host's virtual scheme.
    pub schemas: Vec<String>,
    /// Fully-qualified http(s) URIs.
    pub external_schemas: Vec<String>,
}

impl Manifest {
    /// All entries: `schemas` first, then `external_schemas`.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.schemas
            .iter()
            .chain(self.external_schemas.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len() + self.external_schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Why a manifest or release list location could not be read.
#[derive(Debug)]
pub(crate) enum LocationError {
    UnsupportedScheme,
    Unavailable(String),
}

/// Reads the bytes at `location`: http(s) via `http`, `file:` URLs and plain
/// paths from disk (relative paths against `workspace`).
pub(crate) fn read_location(
    location: &str,
    workspace: &Path,
    http: &dyn HttpClient,
) -> Result<Vec<u8>, LocationError> {
    let local_path = match Url::parse(location) {
        Ok(url) => match url.scheme() {
            "http" | "https" => {
                return http
                    .get(url.as_str())
                    .map_err(|e| LocationError::Unavailable(e.to_string()))
            }
            "file" => url.to_file_path().map_err(|_| {
                LocationError::Unavailable("file URL is not a local path".to_string())
            })?,
            _ => return Err(LocationError::UnsupportedScheme),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => PathBuf::from(location),
        Err(e) => return Err(LocationError::Unavailable(e.to_string())),
    };
    let full = resolve_in(workspace, &local_path);
    std::fs::read(&full)
        .map_err(|e| LocationError::Unavailable(format!("read {}: {}", full.display(), e)))
}

/// Loads and validates the manifest at `location`.
///
/// Run-level failures: `InvalidManifestUri` for unsupported schemes,
/// `ManifestUnavailable` for read/network/parse errors, `EmptyManifest` when
/// both entry lists are empty. Never retried.
pub fn load_manifest(
    location: &str,
    workspace: &Path,
    http: &dyn HttpClient,
) -> Result<Manifest, RunError> {
    tracing::info!(location, "loading manifest");
    let bytes = read_location(location, workspace, http).map_err(|e| match e {
        LocationError::UnsupportedScheme => RunError::InvalidManifestUri {
            uri: location.to_string(),
        },
        LocationError::Unavailable(reason) => RunError::ManifestUnavailable {
            location: location.to_string(),
            reason,
        },
    })?;

    let manifest = parse::parse_manifest(&bytes).map_err(|reason| {
        RunError::ManifestUnavailable {
            location: location.to_string(),
            reason,
        }
    })?;

    if manifest.is_empty() {
        return Err(RunError::EmptyManifest {
            location: location.to_string(),
        });
    }

    tracing::debug!(
        version = %manifest.version,
        schemas = manifest.schemas.len(),
        external = manifest.external_schemas.len(),
        "manifest loaded"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    struct NoHttp;

    impl HttpClient for NoHttp {
        fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Http {
                url: url.to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    struct OneBody(&'static str);

    impl HttpClient for OneBody {
        fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn local_relative_path() {
        let ws = tempfile::tempdir().unwrap();
        std::fs::write(
            ws.path().join("manifest.json"),
            r#"{"version":"1","schemas":["vscode://schemas/settings"],"externalSchemas":[]}"#,
        )
        .unwrap();
        let m = load_manifest("manifest.json", ws.path(), &NoHttp).unwrap();
        assert_eq!(m.version, "1");
        assert_eq!(m.entries().collect::<Vec<_>>(), vec!["vscode://schemas/settings"]);
    }

    #[test]
    fn file_url() {
        let ws = tempfile::tempdir().unwrap();
        let path = ws.path().join("m.json");
        std::fs::write(&path, r#"{"version":"2","schemas":[],"externalSchemas":["https://x/y.json"]}"#)
            .unwrap();
        let url = Url::from_file_path(&path).unwrap();
        let m = load_manifest(url.as_str(), ws.path(), &NoHttp).unwrap();
        assert_eq!(m.external_schemas, vec!["https://x/y.json"]);
    }

    #[test]
    fn remote_manifest() {
        let http = OneBody(r#"{"version":"3","schemas":["vscode://schemas/a"]}"#);
        let m = load_manifest("https://example.com/m.json", Path::new("/"), &http).unwrap();
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn unsupported_scheme_is_invalid_uri() {
        let err = load_manifest("ftp://example.com/m.json", Path::new("/"), &NoHttp).unwrap_err();
        assert!(matches!(err, RunError::InvalidManifestUri { .. }));
        let err =
            load_manifest("vscode://schemas/m", Path::new("/"), &NoHttp).unwrap_err();
        assert!(matches!(err, RunError::InvalidManifestUri { .. }));
    }

    #[test]
    fn network_failure_is_unavailable() {
        let err = load_manifest("https://example.com/m.json", Path::new("/"), &NoHttp).unwrap_err();
        assert!(matches!(err, RunError::ManifestUnavailable { .. }));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let ws = tempfile::tempdir().unwrap();
        let err = load_manifest("nope.json", ws.path(), &NoHttp).unwrap_err();
        assert!(matches!(err, RunError::ManifestUnavailable { .. }));
    }

    #[test]
    fn bad_json_is_unavailable() {
        let err =
            load_manifest("https://example.com/m.json", Path::new("/"), &OneBody("<html>"))
                .unwrap_err();
        assert!(matches!(err, RunError::ManifestUnavailable { .. }));
    }

    #[test]
    fn empty_lists_are_empty_manifest() {
        let http = OneBody(r#"{"version":"1","schemas":[],"schema_urls":[]}"#);
        let err = load_manifest("https://example.com/m.json", Path::new("/"), &http).unwrap_err();
        assert!(matches!(err, RunError::EmptyManifest { .. }));
    }
}
