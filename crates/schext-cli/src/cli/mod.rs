//! CLI for the schext JSON Schema extractor.

mod commands;
mod overrides;
mod picker;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use schext_core::config;
use std::path::PathBuf;

use commands::{run_extract_all, run_extract_one, run_list, run_releases};

/// Top-level CLI for schext.
#[derive(Debug, Parser)]
#[command(name = "schext")]
#[command(about = "schext: extract JSON Schema documents listed in a manifest", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Per-run overrides of the settings file.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Manifest location: http(s) URL, file URL or path (overrides `metadata_uri`; ignores any release list).
    #[arg(long, value_name = "URI")]
    pub manifest: Option<String>,
    /// Release list location (overrides `release_list`).
    #[arg(long, value_name = "URI")]
    pub release_list: Option<String>,
    /// Release to extract when a release list is in use (otherwise you are asked to pick one).
    #[arg(long, value_name = "NAME")]
    pub release: Option<String>,
    /// Output directory, relative to the workspace (overrides `output`).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<String>,
    /// Workspace directory (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract every schema listed in the manifest.
    ExtractAll {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Extract one schema from the manifest.
    ExtractOne {
        /// Schema reference to extract; if omitted you are asked to pick one.
        schema: Option<String>,
        #[command(flatten)]
        args: RunArgs,
    },

    /// Print the manifest's schema references, one per line.
    List {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Print the releases in the configured release list.
    Releases {
        /// Release list location (overrides `release_list`).
        #[arg(long, value_name = "URI")]
        release_list: Option<String>,
        /// Workspace directory (default: current directory).
        #[arg(long, value_name = "DIR")]
        workspace: Option<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::ExtractAll { args } => run_extract_all(&cfg, &args).await?,
            CliCommand::ExtractOne { schema, args } => {
                run_extract_one(&cfg, &args, schema.as_deref()).await?
            }
            CliCommand::List { args } => run_list(&cfg, &args).await?,
            CliCommand::Releases {
                release_list,
                workspace,
            } => {
                let args = RunArgs {
                    release_list,
                    workspace,
                    ..RunArgs::default()
                };
                run_releases(&cfg, &args).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
