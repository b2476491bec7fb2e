//! Schema retrieval: HTTP for remote sources, the document reader for
//! virtual and local ones. Both seams are traits so orchestration can be
//! tested without network or a host document store.

mod document;
mod http;

pub use document::FsDocumentReader;
pub use http::CurlClient;

use serde_json::Value;
use std::path::Path;

use crate::error::FetchError;
use crate::source::SchemaSource;

/// Blocking HTTP GET. Implementations follow redirects and fail on non-2xx.
pub trait HttpClient: Send + Sync {
    /// Returns the response body of a successful GET.
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// A document the host can open as text.
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    /// Path below `vscode://schemas/`.
    Virtual(&'a str),
    /// Filesystem path, relative paths resolved by the reader.
    Local(&'a Path),
}

/// Host document abstraction (opens virtual or local documents as text).
pub trait DocumentReader: Send + Sync {
    fn open_text(&self, document: Document<'_>) -> Result<String, FetchError>;
}

/// Fetches and parses one classified schema reference.
pub fn fetch_schema(
    source: &SchemaSource,
    http: &dyn HttpClient,
    documents: &dyn DocumentReader,
) -> Result<Value, FetchError> {
    match source {
        SchemaSource::KnownHost { url, .. } | SchemaSource::Remote { url } => {
            let body = http.get(url.as_str())?;
            Ok(serde_json::from_slice(&body)?)
        }
        SchemaSource::Virtual { path } => {
            let text = documents.open_text(Document::Virtual(path))?;
            Ok(serde_json::from_str(&text)?)
        }
        SchemaSource::Local { path } => {
            let text = documents.open_text(Document::Local(path))?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::classify;
    use std::collections::HashMap;

    struct StaticHttp(HashMap<String, &'static str>);

    impl HttpClient for StaticHttp {
        fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.0
                .get(url)
                .map(|b| b.as_bytes().to_vec())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    code: 404,
                })
        }
    }

    struct StaticDocs;

    impl DocumentReader for StaticDocs {
        fn open_text(&self, document: Document<'_>) -> Result<String, FetchError> {
            match document {
                Document::Virtual("settings") => Ok(r#"{"type":"object"}"#.to_string()),
                Document::Local(p) if p == Path::new("local.json") => Ok("[1, 2]".to_string()),
                Document::Virtual(p) => Err(FetchError::MissingDocument { uri: p.to_string() }),
                Document::Local(p) => Err(FetchError::MissingDocument {
                    uri: p.display().to_string(),
                }),
            }
        }
    }

    fn http() -> StaticHttp {
        let mut m = HashMap::new();
        m.insert(
            "https://example.com/ok.json".to_string(),
            r#"{"$schema":"x"}"#,
        );
        m.insert("https://example.com/broken.json".to_string(), "{not json");
        StaticHttp(m)
    }

    #[test]
    fn remote_is_fetched_over_http() {
        let src = classify("https://example.com/ok.json").unwrap();
        let v = fetch_schema(&src, &http(), &StaticDocs).unwrap();
        assert_eq!(v["$schema"], "x");
    }

    #[test]
    fn virtual_and_local_use_document_reader() {
        let v = fetch_schema(&classify("vscode://schemas/settings").unwrap(), &http(), &StaticDocs)
            .unwrap();
        assert_eq!(v["type"], "object");
        let v = fetch_schema(&classify("local.json").unwrap(), &http(), &StaticDocs).unwrap();
        assert_eq!(v, serde_json::json!([1, 2]));
    }

    #[test]
    fn malformed_body_is_json_error() {
        let src = classify("https://example.com/broken.json").unwrap();
        assert!(matches!(
            fetch_schema(&src, &http(), &StaticDocs),
            Err(FetchError::Json(_))
        ));
    }

    #[test]
    fn http_status_propagates() {
        let src = classify("https://example.com/missing.json").unwrap();
        assert!(matches!(
            fetch_schema(&src, &http(), &StaticDocs),
            Err(FetchError::Status { code: 404, .. })
        ));
    }
}
