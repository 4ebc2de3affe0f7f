//! CLI for the LRC link reputation checker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lrc_core::config;

use commands::run_check;

/// Top-level CLI for the LRC link reputation checker.
#[derive(Debug, Parser)]
#[command(name = "lrc")]
#[command(about = "LRC: link reputation checker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check one or more link targets against the reputation providers.
    Check {
        /// Link targets to check (scheme optional; `http://` is assumed).
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print verdicts as JSON, one object per line.
        #[arg(long)]
        json: bool,

        /// Stay alive past the deep-scan settle delay and print any verdicts
        /// the deep scan revised.
        #[arg(long)]
        wait_deep: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check {
                urls,
                json,
                wait_deep,
            } => run_check(&cfg, &urls, json, wait_deep).await?,
        }

        Ok(())
    }
}
