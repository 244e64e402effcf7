//! CLI for the RUM request classifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use rumc_core::config;
use rumc_core::logging;

use commands::{
    run_checkpoint, run_classify, run_clean_url, run_completions, run_event, run_mask_time,
};

/// Top-level CLI for the RUM request classifier.
#[derive(Debug, Parser)]
#[command(name = "rumc")]
#[command(about = "RUMC: classify and anonymize RUM request metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Classify a request by its headers (client class and subsystem).
    Classify {
        /// Request header as "Name: value". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Classify a JSON RUM event payload and print the stored record.
    Event {
        /// Path to the JSON payload, or "-" for stdin.
        path: String,

        /// Request header as "Name: value". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Receive time in ms since epoch (default: now).
        #[arg(long, value_name = "MILLIS")]
        now: Option<i64>,
    },

    /// Mask a timestamp (ms since epoch) to its hour bucket.
    #[command(allow_negative_numbers = true)]
    MaskTime {
        /// Timestamp in ms since epoch.
        time: i64,

        /// Padding in ms (number or numeric string).
        #[arg(long)]
        padding: Option<String>,
    },

    /// Strip credentials, query and fragment from a URL.
    CleanUrl {
        url: String,
    },

    /// Check whether a checkpoint name is in the vocabulary.
    Checkpoint {
        name: String,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        if logging::init_logging(cfg.log_filter.as_deref()).is_err() {
            logging::init_logging_stderr(cfg.log_filter.as_deref());
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Classify { headers } => run_classify(&cfg, &headers)?,
            CliCommand::Event { path, headers, now } => {
                run_event(&cfg, &path, &headers, now).await?
            }
            CliCommand::MaskTime { time, padding } => run_mask_time(time, padding.as_deref()),
            CliCommand::CleanUrl { url } => run_clean_url(&url),
            CliCommand::Checkpoint { name } => run_checkpoint(&cfg, &name),
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
