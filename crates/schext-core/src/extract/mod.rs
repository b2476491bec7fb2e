//! Extraction orchestrator.
//!
//! A run is linear: load the manifest (once, never retried), pick the entries,
//! create the output root, then fetch and write every entry independently.
//! Run-level failures abort before the filesystem is touched; entry-level
//! failures are logged and collected in the [`ExtractionReport`].

mod report;
mod run;

pub use report::{ExtractionReport, WrittenSchema};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RunSettings;
use crate::error::RunError;
use crate::fetch::{DocumentReader, HttpClient};
use crate::manifest::{self, Manifest, Release};
use crate::naming::NamingRules;
use crate::output::FileWriter;
use crate::workspace::resolve_in;

use run::{run_entries, EntryContext};

/// Default bound on entries in flight.
pub const DEFAULT_MAX_CONCURRENT: usize = 16;

/// Interactive choice among `items`; returns the chosen index or `None` if cancelled.
pub trait Picker: Send + Sync {
    fn pick(&self, title: &str, items: &[String]) -> Option<usize>;
}

/// Ties manifest loading, fetching, naming and writing together.
pub struct Extractor {
    workspace: PathBuf,
    http: Arc<dyn HttpClient>,
    documents: Arc<dyn DocumentReader>,
    writer: Arc<dyn FileWriter>,
    rules: NamingRules,
    max_concurrent: usize,
}

impl Extractor {
    pub fn new(
        workspace: impl Into<PathBuf>,
        http: Arc<dyn HttpClient>,
        documents: Arc<dyn DocumentReader>,
        writer: Arc<dyn FileWriter>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            http,
            documents,
            writer,
            rules: NamingRules::default(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_rules(mut self, rules: NamingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Bound on concurrent entries (values below 1 are treated as 1).
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Output root for a configured `output` value (relative to the workspace unless absolute).
    pub fn output_root(&self, output: &str) -> PathBuf {
        resolve_in(&self.workspace, output)
    }

    /// Loads the manifest on a blocking thread.
    pub async fn load_manifest(&self, location: &str) -> Result<Manifest, RunError> {
        let http = Arc::clone(&self.http);
        let workspace = self.workspace.clone();
        let owned = location.to_string();
        tokio::task::spawn_blocking(move || manifest::load_manifest(&owned, &workspace, http.as_ref()))
            .await
            .map_err(|e| RunError::ManifestUnavailable {
                location: location.to_string(),
                reason: format!("loader task: {}", e),
            })?
    }

    /// Loads the release list on a blocking thread.
    pub async fn load_releases(&self, location: &str) -> Result<Vec<Release>, RunError> {
        let http = Arc::clone(&self.http);
        let workspace = self.workspace.clone();
        let owned = location.to_string();
        tokio::task::spawn_blocking(move || {
            manifest::load_releases(&owned, &workspace, http.as_ref())
        })
        .await
        .map_err(|e| RunError::InvalidReleaseList {
            location: location.to_string(),
            reason: format!("loader task: {}", e),
        })?
    }

    /// Decides which manifest to use.
    ///
    /// Without a release list this is `settings.metadata_uri`, and naming a
    /// release is an error. With one, the release named `release` is used, or
    /// the picker chooses; `Ok(None)` means the user cancelled the choice.
    pub async fn manifest_location(
        &self,
        settings: &RunSettings,
        release: Option<&str>,
        picker: &dyn Picker,
    ) -> Result<Option<String>, RunError> {
        let Some(list) = settings.release_list.as_deref() else {
            if let Some(name) = release {
                return Err(RunError::NoReleaseList {
                    name: name.to_string(),
                });
            }
            return Ok(Some(settings.metadata_uri.clone()));
        };

        let releases = self.load_releases(list).await?;
        let chosen = match release {
            Some(name) => manifest::find_release(&releases, name)?,
            None => {
                let names: Vec<String> = releases.iter().map(|r| r.name.clone()).collect();
                match picker.pick("Pick a release", &names) {
                    Some(i) => match releases.get(i) {
                        Some(r) => r,
                        None => return Ok(None),
                    },
                    None => return Ok(None),
                }
            }
        };
        tracing::info!(release = %chosen.name, url = %chosen.url, "release selected");
        Ok(Some(chosen.url.clone()))
    }

    /// Extracts every entry of the manifest at `manifest_location` into `output_root`.
    ///
    /// Returns `Ok` once all entries have settled, even if some failed.
    pub async fn extract_all(
        &self,
        manifest_location: &str,
        output_root: &Path,
    ) -> Result<ExtractionReport, RunError> {
        let manifest = self.load_manifest(manifest_location).await?;
        let entries: Vec<String> = manifest.entries().map(String::from).collect();
        self.extract_entries(entries, output_root).await
    }

    /// Extracts a single entry chosen by `picker` from the manifest's entries.
    ///
    /// A cancelled choice ends the run with an empty report and nothing written.
    pub async fn extract_one(
        &self,
        manifest_location: &str,
        output_root: &Path,
        picker: &dyn Picker,
    ) -> Result<ExtractionReport, RunError> {
        let manifest = self.load_manifest(manifest_location).await?;
        let entries: Vec<String> = manifest.entries().map(String::from).collect();
        let Some(index) = picker.pick("Pick a schema", &entries) else {
            tracing::info!("no schema selected");
            return Ok(ExtractionReport::default());
        };
        let Some(chosen) = entries.get(index).cloned() else {
            tracing::info!(index, "selection out of range");
            return Ok(ExtractionReport::default());
        };
        self.extract_entries(vec![chosen], output_root).await
    }

    /// Extracts `reference`, which must be listed by the manifest.
    ///
    /// An unlisted reference is `NotInManifest` and nothing is created.
    pub async fn extract_reference(
        &self,
        manifest_location: &str,
        output_root: &Path,
        reference: &str,
    ) -> Result<ExtractionReport, RunError> {
        let manifest = self.load_manifest(manifest_location).await?;
        if !manifest.entries().any(|e| e == reference) {
            return Err(RunError::NotInManifest {
                reference: reference.to_string(),
                location: manifest_location.to_string(),
            });
        }
        self.extract_entries(vec![reference.to_string()], output_root)
            .await
    }

    /// Creates `output_root` once, then fetches and writes every entry.
    pub async fn extract_entries(
        &self,
        entries: Vec<String>,
        output_root: &Path,
    ) -> Result<ExtractionReport, RunError> {
        if entries.is_empty() {
            return Ok(ExtractionReport::default());
        }

        self.writer
            .create_dir_all(output_root)
            .map_err(|e| RunError::OutputRoot {
                path: output_root.to_path_buf(),
                source: e,
            })?;
        tracing::info!(
            entries = entries.len(),
            root = %output_root.display(),
            "extracting schemas"
        );

        let ctx = Arc::new(EntryContext {
            http: Arc::clone(&self.http),
            documents: Arc::clone(&self.documents),
            writer: Arc::clone(&self.writer),
            rules: self.rules.clone(),
            root: output_root.to_path_buf(),
        });
        let report = run_entries(ctx, entries, self.max_concurrent).await;

        tracing::info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "extraction finished"
        );
        Ok(report)
    }
}
