//! CLI for the ffm files.fm bulk downloader.

mod browser;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ffm_core::config;
use ffm_core::progress_db::ProgressDb;

use commands::{run_all, run_batch, run_config, run_reset, run_status};

/// Top-level CLI for the ffm bulk downloader.
#[derive(Debug, Parser)]
#[command(name = "ffm")]
#[command(about = "ffm: batch downloader driving the files.fm multi-select UI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the next batch of unprocessed items from a folder page.
    Batch {
        /// URL of the files.fm folder page.
        url: String,

        /// Rows to select per cycle (overrides the saved setting).
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,

        /// Also select folder rows (the page zips them), not just files.
        #[arg(long)]
        include_folders: bool,
    },

    /// Keep downloading batches until every item has been processed.
    All {
        /// URL of the files.fm folder page.
        url: String,

        /// Rows to select per cycle (overrides the saved setting).
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,

        /// Also select folder rows (the page zips them), not just files.
        #[arg(long)]
        include_folders: bool,
    },

    /// Show stored progress for one folder, or an overview of all folders.
    Status {
        /// URL of the files.fm folder page (omit to list all known folders).
        url: Option<String>,
    },

    /// Forget stored progress for a folder so the next run starts over.
    Reset {
        /// URL of the files.fm folder page.
        url: String,
    },

    /// Show the saved settings, or update them.
    Config {
        /// New default batch size.
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,

        /// New default for selecting folder rows (true/false).
        #[arg(long, value_name = "BOOL")]
        include_folders: Option<bool>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let db = ProgressDb::open_default().await?;

        match cli.command {
            CliCommand::Batch {
                url,
                batch_size,
                include_folders,
            } => run_batch(&db, &cfg, &url, batch_size, include_folders).await?,
            CliCommand::All {
                url,
                batch_size,
                include_folders,
            } => run_all(&db, &cfg, &url, batch_size, include_folders).await?,
            CliCommand::Status { url } => run_status(&db, url.as_deref()).await?,
            CliCommand::Reset { url } => run_reset(&db, &url).await?,
            CliCommand::Config {
                batch_size,
                include_folders,
            } => run_config(cfg, batch_size, include_folders)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
