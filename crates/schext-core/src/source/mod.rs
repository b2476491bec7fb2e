//! Schema reference classification.
//!
//! Each reference string is classified once into a [`SchemaSource`]; fetching
//! and output naming both work from that value instead of re-parsing the URI.

mod known_host;

pub use known_host::{RepoLocation, RAW_CONTENT_HOST};

use std::path::PathBuf;
use url::Url;

use crate::error::FetchError;

/// Scheme of the host's virtual schema documents.
pub const VIRTUAL_SCHEME: &str = "vscode";
/// Authority of the host's virtual schema documents.
pub const VIRTUAL_AUTHORITY: &str = "schemas";

/// Where a schema reference points and how to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// `vscode://schemas/<path>`: served by the document reader.
    Virtual { path: String },
    /// `file://` URL or a plain filesystem path.
    Local { path: PathBuf },
    /// Raw-content hosting URL. `location` is `None` when the path does not
    /// follow the `{owner}/{repo}/{ref}/{path}` layout.
    KnownHost {
        url: Url,
        location: Option<RepoLocation>,
    },
    /// Any other http(s) URL.
    Remote { url: Url },
}

/// Classifies a schema reference.
///
/// Strings without a scheme are treated as local paths. Schemes other than
/// http, https, file and the virtual schema scheme are rejected.
pub fn classify(uri: &str) -> Result<SchemaSource, FetchError> {
    let url = match Url::parse(uri) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Ok(SchemaSource::Local {
                path: PathBuf::from(uri),
            })
        }
        Err(e) => {
            return Err(FetchError::InvalidUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            })
        }
    };

    match url.scheme() {
        VIRTUAL_SCHEME => classify_virtual(uri, &url),
        "file" => {
            let path = url.to_file_path().map_err(|_| FetchError::InvalidUri {
                uri: uri.to_string(),
                reason: "not a local file path".to_string(),
            })?;
            Ok(SchemaSource::Local { path })
        }
        "http" | "https" => {
            if url.host_str() == Some(RAW_CONTENT_HOST) {
                let location = RepoLocation::from_url_path(url.path());
                Ok(SchemaSource::KnownHost { url, location })
            } else {
                Ok(SchemaSource::Remote { url })
            }
        }
        other => Err(FetchError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// The virtual path is the reference text after `vscode://schemas/`, taken
/// verbatim: `url.path()` would percent-encode it and drop `?`/`#` parts.
fn classify_virtual(uri: &str, url: &Url) -> Result<SchemaSource, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUri {
        uri: uri.to_string(),
        reason,
    };
    let expected = format!("{}://{}/", VIRTUAL_SCHEME, VIRTUAL_AUTHORITY);
    if url.host_str() != Some(VIRTUAL_AUTHORITY) {
        return Err(invalid(format!("expected {}...", expected)));
    }
    let path = uri
        .get(..expected.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(&expected))
        .map(|_| &uri[expected.len()..])
        .ok_or_else(|| invalid(format!("expected {}...", expected)))?;

    if path.is_empty() {
        return Err(invalid("empty schema path".to_string()));
    }
    if path.contains(['?', '#']) {
        return Err(invalid("query or fragment in schema path".to_string()));
    }
    Ok(SchemaSource::Virtual {
        path: path.to_string(),
    })
}
