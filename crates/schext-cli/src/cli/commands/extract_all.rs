//! `schext extract-all` – extract every schema in the manifest.

use anyhow::Result;
use schext_core::config::SchextConfig;

use super::{print_report, Session};
use crate::cli::RunArgs;

pub async fn run_extract_all(cfg: &SchextConfig, args: &RunArgs) -> Result<()> {
    let session = Session::open(cfg, args)?;
    let Some(location) = session.manifest_location(args.release.as_deref()).await? else {
        return Ok(());
    };
    let root = session.extractor.output_root(&session.settings.output);
    let report = session.extractor.extract_all(&location, &root).await?;
    print_report(&report);
    Ok(())
}
