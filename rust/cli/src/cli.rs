//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::writer::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "hhreplay",
    version,
    about = "Parse and replay PokerStars hand histories"
)]
pub struct HhreplayCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an export and write one record per hand
    Parse {
        /// Hand-history export (plain text or .zst)
        #[arg(long)]
        input: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
        format: OutputFormat,
        /// Write records here instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Step through hands action by action
    Replay {
        #[arg(long)]
        input: String,
        /// Only replay the hand with this id
        #[arg(long)]
        hand: Option<String>,
    },
    /// Summarize an export as JSON
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Check every parsed hand for structural consistency
    Verify {
        #[arg(long)]
        input: String,
    },
    /// Report whether an export is an English hand history
    Validate {
        #[arg(long)]
        input: String,
    },
    /// Print review hints and analysis context per hand
    Gaps {
        #[arg(long)]
        input: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
