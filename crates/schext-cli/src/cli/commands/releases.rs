//! `schext releases` – print the release list.

use anyhow::Result;
use schext_core::config::SchextConfig;

use super::Session;
use crate::cli::RunArgs;

pub async fn run_releases(cfg: &SchextConfig, args: &RunArgs) -> Result<()> {
    let session = Session::open(cfg, args)?;
    let Some(list) = session.settings.release_list.as_deref() else {
        anyhow::bail!("no release list configured (set release_list or pass --release-list)");
    };
    let releases = session.extractor.load_releases(list).await?;
    for release in &releases {
        println!("{}\t{}", release.name, release.url);
    }
    Ok(())
}
