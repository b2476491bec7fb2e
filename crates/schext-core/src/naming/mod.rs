//! Output path derivation.
//!
//! Maps a classified schema reference to a path relative to the output root:
//!
//! - `vscode://schemas/<p>` -> `<p>.json`
//! - raw-content URLs from the recognized extension repository under
//!   `extension(s)/<name>/.../<file>` -> `<name>/<file>`
//! - other raw-content URLs -> `external-schemas/<repo>/<file>`
//! - anything else -> the sanitized trailing segment, directly under the root

mod path;
mod sanitize;

pub use path::{join_relative, last_fs_segment, last_url_segment};
pub use sanitize::sanitize_filename;

use std::path::PathBuf;

use crate::config::DEFAULT_EXTENSION_REPO;
use crate::error::EntryError;
use crate::source::{RepoLocation, SchemaSource};

/// Directory (below the output root) for raw-content schemas outside the extension layout.
pub const EXTERNAL_DIR: &str = "external-schemas";

/// First path segments that mark a per-extension schema in the extension repository.
const EXTENSION_MARKERS: [&str; 2] = ["extension", "extensions"];

/// Host-specific naming conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRules {
    /// Repository whose extension schemas are written as `<extension>/<file>`.
    pub extension_repo: String,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            extension_repo: DEFAULT_EXTENSION_REPO.to_string(),
        }
    }
}

/// Derives the output path (relative to the output root) for one reference.
pub fn resolve_output_path(
    reference: &str,
    source: &SchemaSource,
    rules: &NamingRules,
) -> Result<PathBuf, EntryError> {
    let unresolvable = |reason: String| EntryError::UnresolvablePath {
        reference: reference.to_string(),
        reason,
    };

    match source {
        SchemaSource::Virtual { path } => {
            join_relative(&[format!("{}.json", path).as_str()], true).map_err(unresolvable)
        }
        SchemaSource::KnownHost { location, .. } => {
            let location = location.as_ref().ok_or_else(|| {
                unresolvable("URL does not match the {owner}/{repo}/{ref}/{path} layout".to_string())
            })?;
            known_host_path(location, rules).map_err(unresolvable)
        }
        SchemaSource::Remote { url } => {
            let name = last_url_segment(url)
                .map(|s| sanitize_filename(&s))
                .filter(|s| !s.is_empty())
                .ok_or_else(|| unresolvable("URL has no file name".to_string()))?;
            join_relative(&[name.as_str()], false).map_err(unresolvable)
        }
        SchemaSource::Local { path } => {
            let name = last_fs_segment(path)
                .map(|s| sanitize_filename(&s))
                .filter(|s| !s.is_empty())
                .ok_or_else(|| unresolvable("path has no file name".to_string()))?;
            join_relative(&[name.as_str()], false).map_err(unresolvable)
        }
    }
}

fn known_host_path(location: &RepoLocation, rules: &NamingRules) -> Result<PathBuf, String> {
    let segments = location.segments();
    let file = *segments
        .last()
        .ok_or_else(|| "repository path is empty".to_string())?;

    let is_extension_schema = location.repo == rules.extension_repo
        && segments.len() >= 3
        && EXTENSION_MARKERS.contains(&segments[0]);

    if is_extension_schema {
        join_relative(&[segments[1], file], false)
    } else {
        join_relative(&[EXTERNAL_DIR, location.repo.as_str(), file], false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::classify;
    use std::path::Path;

    fn resolve(uri: &str) -> Result<PathBuf, EntryError> {
        let source = classify(uri).unwrap();
        resolve_output_path(uri, &source, &NamingRules::default())
    }

    #[test]
    fn virtual_gets_json_suffix() {
        assert_eq!(
            resolve("vscode://schemas/settings").unwrap(),
            Path::new("settings.json")
        );
        assert_eq!(
            resolve("vscode://schemas/settings/folder").unwrap(),
            Path::new("settings/folder.json")
        );
    }

    #[test]
    fn virtual_keeps_the_literal_path() {
        assert_eq!(
            resolve("vscode://schemas/my schema").unwrap(),
            Path::new("my schema.json")
        );
        assert_eq!(
            resolve("vscode://schemas/café/lait").unwrap(),
            Path::new("café/lait.json")
        );
    }

    #[test]
    fn virtual_traversal_is_unresolvable() {
        let source = SchemaSource::Virtual {
            path: "../escape".to_string(),
        };
        assert!(matches!(
            resolve_output_path("x", &source, &NamingRules::default()),
            Err(EntryError::UnresolvablePath { .. })
        ));
    }

    #[test]
    fn extension_repo_uses_extension_name() {
        assert_eq!(
            resolve("https://raw.githubusercontent.com/microsoft/vscode/main/extensions/npm/schemas/package.schema.json")
                .unwrap(),
            Path::new("npm/package.schema.json")
        );
        assert_eq!(
            resolve("https://raw.githubusercontent.com/microsoft/vscode/main/extension/foo/bar.json")
                .unwrap(),
            Path::new("foo/bar.json")
        );
    }

    #[test]
    fn custom_extension_repo() {
        let uri = "https://raw.githubusercontent.com/acme/widgets/main/extension/foo/package.schema.json";
        let rules = NamingRules {
            extension_repo: "widgets".to_string(),
        };
        let path = resolve_output_path(uri, &classify(uri).unwrap(), &rules).unwrap();
        assert_eq!(path, Path::new("foo/package.schema.json"));
    }

    #[test]
    fn other_repo_goes_to_external_schemas() {
        assert_eq!(
            resolve("https://raw.githubusercontent.com/acme/widgets/main/extension/foo/package.schema.json")
                .unwrap(),
            Path::new("external-schemas/widgets/package.schema.json")
        );
    }

    #[test]
    fn extension_repo_outside_marker_goes_to_external_schemas() {
        assert_eq!(
            resolve("https://raw.githubusercontent.com/microsoft/vscode/main/src/vs/schema.json")
                .unwrap(),
            Path::new("external-schemas/vscode/schema.json")
        );
        // Too short to carry both an extension name and a file.
        assert_eq!(
            resolve("https://raw.githubusercontent.com/microsoft/vscode/main/extensions/x.json")
                .unwrap(),
            Path::new("external-schemas/vscode/x.json")
        );
    }

    #[test]
    fn known_host_without_layout_is_unresolvable() {
        match resolve("https://raw.githubusercontent.com/acme/widgets") {
            Err(EntryError::UnresolvablePath { reference, .. }) => {
                assert_eq!(reference, "https://raw.githubusercontent.com/acme/widgets")
            }
            other => panic!("expected UnresolvablePath, got {:?}", other),
        }
    }

    #[test]
    fn generic_remote_keeps_trailing_segment() {
        assert_eq!(
            resolve("https://json.schemastore.org/api/json/tsconfig.json?v=2").unwrap(),
            Path::new("tsconfig.json")
        );
        assert!(matches!(
            resolve("https://json.schemastore.org/"),
            Err(EntryError::UnresolvablePath { .. })
        ));
    }

    #[test]
    fn local_keeps_file_name() {
        assert_eq!(
            resolve("file:///srv/schemas/my schema.json").unwrap(),
            Path::new("my_schema.json")
        );
        assert_eq!(
            resolve("schemas/local.json").unwrap(),
            Path::new("local.json")
        );
    }
}
