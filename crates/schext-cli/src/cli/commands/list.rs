//! `schext list` – print the manifest's schema references.

use anyhow::Result;
use schext_core::config::SchextConfig;

use super::Session;
use crate::cli::RunArgs;

pub async fn run_list(cfg: &SchextConfig, args: &RunArgs) -> Result<()> {
    let session = Session::open(cfg, args)?;
    let Some(location) = session.manifest_location(args.release.as_deref()).await? else {
        return Ok(());
    };
    let manifest = session.extractor.load_manifest(&location).await?;
    if !manifest.version.is_empty() {
        tracing::info!(version = %manifest.version, "listing manifest");
    }
    for entry in manifest.entries() {
        println!("{entry}");
    }
    Ok(())
}
