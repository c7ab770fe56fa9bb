//! Command handler modules for the hhreplay CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so tests drive handlers with `Vec<u8>`
//! - User-facing messages written with [`crate::ui`] before the error is returned

mod cfg;
mod gaps;
mod parse;
mod replay;
mod stats;
mod validate;
mod verify;

pub use cfg::handle_cfg_command;
pub use gaps::handle_gaps_command;
pub use parse::handle_parse_command;
pub use replay::handle_replay_command;
pub use stats::handle_stats_command;
pub use validate::handle_validate_command;
pub use verify::{check_replay, handle_verify_command};

use hhreplay_engine::HandParser;
use hhreplay_engine::batch::{BatchReport, parse_batch};
use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;

/// Reads `input`, reporting an unreadable file on `err`.
pub(crate) fn read_input(input: &str, err: &mut dyn Write) -> Result<String, CliError> {
    read_text_auto(input).map_err(|e| {
        let msg = format!("Failed to read {}: {}", input, e);
        let _ = ui::write_error(err, &msg);
        CliError::InvalidInput(msg)
    })
}

/// Batch-parses `text` with the configured parser and segmenter.
pub(crate) fn parse_text(text: &str, config: &Config) -> BatchReport {
    let parser = HandParser::with_options(config.parse_options());
    parse_batch(text, &parser, &config.segmenter())
}

/// Fails with the engine's "no valid hands found" when nothing parsed.
pub(crate) fn require_hands(
    report: BatchReport,
    err: &mut dyn Write,
) -> Result<BatchReport, CliError> {
    report.into_result().map_err(|e| {
        let _ = ui::write_error(err, &e.to_string());
        CliError::from(e)
    })
}

/// Read, parse and require at least one hand.
pub(crate) fn load_hands(
    input: &str,
    config: &Config,
    err: &mut dyn Write,
) -> Result<BatchReport, CliError> {
    let text = read_input(input, err)?;
    require_hands(parse_text(&text, config), err)
}
