use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::presets::SensitivityPreset;

#[derive(Parser, Debug)]
#[command(author, version, about = "fair-play risk scoring for chess game history")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Score an already-fetched player snapshot
    Score {
        /// Path to the snapshot JSON file
        input: PathBuf,
        /// Only count rated games toward the recent sample
        #[arg(long)]
        rated_only: bool,
        /// Include the numeric factor breakdown in the output
        #[arg(long)]
        debug: bool,
        /// Sensitivity preset
        #[arg(long, value_enum, default_value_t = SensitivityPreset::Standard)]
        preset: SensitivityPreset,
        /// Evaluation clock override (RFC 3339), for reproducible runs
        #[arg(long)]
        now: Option<String>,
    },
    /// Summarize a file of crowdsourced player reports
    Reputation {
        /// Path to the reports JSON file
        input: PathBuf,
    },
    /// List the sensitivity presets and their tunables
    Presets,
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
