//! `schext extract-one [SCHEMA]` – extract a single schema from the manifest.

use anyhow::Result;
use schext_core::config::SchextConfig;

use super::{print_report, Session};
use crate::cli::picker::StdinPicker;
use crate::cli::RunArgs;

pub async fn run_extract_one(
    cfg: &SchextConfig,
    args: &RunArgs,
    schema: Option<&str>,
) -> Result<()> {
    let session = Session::open(cfg, args)?;
    let Some(location) = session.manifest_location(args.release.as_deref()).await? else {
        return Ok(());
    };
    let root = session.extractor.output_root(&session.settings.output);

    let report = match schema {
        Some(reference) => {
            session
                .extractor
                .extract_reference(&location, &root, reference)
                .await?
        }
        None => {
            session
                .extractor
                .extract_one(&location, &root, &StdinPicker)
                .await?
        }
    };
    print_report(&report);
    Ok(())
}
