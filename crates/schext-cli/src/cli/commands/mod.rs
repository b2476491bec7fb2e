//! CLI command handlers. Each command is in its own file.

mod extract_all;
mod extract_one;
mod list;
mod releases;

pub use extract_all::run_extract_all;
pub use extract_one::run_extract_one;
pub use list::run_list;
pub use releases::run_releases;

use anyhow::{Context, Result};
use schext_core::config::{RunSettings, SchextConfig};
use schext_core::extract::{ExtractionReport, Extractor};
use schext_core::fetch::{CurlClient, FsDocumentReader};
use schext_core::naming::NamingRules;
use schext_core::output::FsWriter;
use schext_core::workspace::resolve_workspace;
use std::sync::Arc;
use std::time::Duration;

use super::overrides::CliOverrides;
use super::picker::StdinPicker;
use super::RunArgs;

/// Extractor plus the settings resolved for this invocation.
pub(crate) struct Session {
    pub extractor: Extractor,
    pub settings: RunSettings,
}

impl Session {
    pub fn open(cfg: &SchextConfig, args: &RunArgs) -> Result<Self> {
        let workspace = resolve_workspace(args.workspace.as_deref())?;
        let settings = RunSettings::resolve(&CliOverrides { args, config: cfg });
        let store = cfg
            .schema_store_dir()
            .context("resolve schema store directory")?;
        tracing::debug!(
            workspace = %workspace.display(),
            store = %store.display(),
            "session opened"
        );

        let http = CurlClient::new(Duration::from_secs(cfg.connect_timeout_secs));
        let extractor = Extractor::new(
            workspace.clone(),
            Arc::new(http),
            Arc::new(FsDocumentReader::new(store, workspace)),
            Arc::new(FsWriter),
        )
        .with_rules(NamingRules {
            extension_repo: cfg.extension_repo.clone(),
        })
        .with_max_concurrent(cfg.max_concurrent_fetches);

        Ok(Self { extractor, settings })
    }

    /// Manifest to use, consulting the release list if one is configured.
    /// `None` when the user cancelled the release choice.
    pub async fn manifest_location(&self, release: Option<&str>) -> Result<Option<String>> {
        Ok(self
            .extractor
            .manifest_location(&self.settings, release, &StdinPicker)
            .await?)
    }
}

/// One line per failed entry on stderr, then the completion line.
pub(crate) fn print_report(report: &ExtractionReport) {
    for failure in &report.failures {
        eprintln!("schext: {}", failure);
    }
    for written in &report.written {
        tracing::debug!(path = %written.path.display(), "written");
    }
    if report.attempted() > 0 {
        tracing::info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "run complete"
        );
        println!("Schemas extracted.");
    }
}
