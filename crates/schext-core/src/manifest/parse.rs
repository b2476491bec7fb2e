//! Manifest wire format.
//!
//! Canonical shape: `{ "version", "schemas", "externalSchemas" }`. The older
//! `schema_urls` key is accepted as a legacy spelling of `externalSchemas`;
//! a document using both is rejected as ambiguous.

use serde::Deserialize;

use super::Manifest;

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    schemas: Option<Vec<String>>,
    #[serde(default, rename = "externalSchemas")]
    external_schemas: Option<Vec<String>>,
    #[serde(default)]
    schema_urls: Option<Vec<String>>,
}

/// Decodes and migrates a manifest document. Errors are human-readable reasons.
pub(super) fn parse_manifest(bytes: &[u8]) -> Result<Manifest, String> {
    let raw: RawManifest =
        serde_json::from_slice(bytes).map_err(|e| format!("invalid manifest JSON: {}", e))?;

    let schemas = raw
        .schemas
        .ok_or_else(|| "manifest has no \"schemas\" list".to_string())?;

    let external_schemas = match (raw.external_schemas, raw.schema_urls) {
        (Some(_), Some(_)) => {
            return Err(
                "manifest sets both \"externalSchemas\" and legacy \"schema_urls\"".to_string(),
            )
        }
        (Some(current), None) => current,
        (None, Some(legacy)) => {
            tracing::warn!("manifest uses legacy \"schema_urls\"; treating it as \"externalSchemas\"");
            legacy
        }
        (None, None) => Vec::new(),
    };

    Ok(Manifest {
        version: raw.version.unwrap_or_default(),
        schemas,
        external_schemas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_shape() {
        let m = parse_manifest(
            br#"{"version":"1.90.0","schemas":["vscode://schemas/settings"],"externalSchemas":["https://a/b.json"]}"#,
        )
        .unwrap();
        assert_eq!(m.version, "1.90.0");
        assert_eq!(m.schemas, vec!["vscode://schemas/settings"]);
        assert_eq!(m.external_schemas, vec!["https://a/b.json"]);
    }

    #[test]
    fn legacy_schema_urls_migrated() {
        let m = parse_manifest(
            br#"{"version":"1","schemas":["vscode://schemas/settings"],"schema_urls":["https://a/b.json"]}"#,
        )
        .unwrap();
        assert_eq!(m.external_schemas, vec!["https://a/b.json"]);
    }

    #[test]
    fn both_spellings_rejected() {
        let err = parse_manifest(
            br#"{"schemas":[],"schema_urls":["https://a"],"externalSchemas":["https://b"]}"#,
        )
        .unwrap_err();
        assert!(err.contains("legacy"));
    }

    #[test]
    fn missing_schemas_rejected() {
        assert!(parse_manifest(br#"{"version":"1","externalSchemas":["https://a"]}"#).is_err());
    }

    #[test]
    fn non_array_schemas_rejected() {
        assert!(parse_manifest(br#"{"schemas":"vscode://schemas/settings"}"#).is_err());
    }

    #[test]
    fn version_optional() {
        let m = parse_manifest(br#"{"schemas":["vscode://schemas/a"]}"#).unwrap();
        assert_eq!(m.version, "");
        assert!(m.external_schemas.is_empty());
    }
}
