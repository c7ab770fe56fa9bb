//! # hhreplay CLI Library
//!
//! Command-line front end for the hand-history replay engine: batch parsing
//! of exports to JSON, text playback, statistics, consistency checks and the
//! language pre-pass.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["hhreplay", "parse", "--input", "HH20250730.txt"];
//! let code = hhreplay_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `parse`: Parse an export into JSONL/JSON replay views or metadata records
//! - `replay`: Step through hands action by action
//! - `stats`: Summarize parsed and skipped hands, hero actions and gaps
//! - `verify`: Check every parsed hand for structural consistency
//! - `validate`: Check that an export is an English hand history
//! - `gaps`: Print review hints and analysis context
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod writer;

use cli::{Commands, HhreplayCli};
use commands::{
    handle_cfg_command, handle_gaps_command, handle_parse_command, handle_replay_command,
    handle_stats_command, handle_validate_command, handle_verify_command,
};

pub use commands::check_replay;
pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &[
    "parse", "replay", "stats", "verify", "validate", "gaps", "cfg",
];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments, loads the configuration, installs logging
/// and dispatches to the subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let code = hhreplay_cli::run(["hhreplay", "cfg"], &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HhreplayCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    // cfg reports configuration problems itself
    if let Commands::Cfg = cli.cmd {
        return finish(handle_cfg_command(out, err), err);
    }

    let config = match config::load() {
        Ok(c) => c,
        Err(e) => {
            let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
            return exit_code::ERROR;
        }
    };
    logging::init_logging(&config.log_filter);

    let result = match cli.cmd {
        Commands::Parse {
            input,
            format,
            output,
        } => handle_parse_command(input, format, output, &config, out, err),
        Commands::Replay { input, hand } => handle_replay_command(input, hand, &config, out, err),
        Commands::Stats { input } => handle_stats_command(input, &config, out, err),
        Commands::Verify { input } => handle_verify_command(input, &config, out, err),
        Commands::Validate { input } => handle_validate_command(input, out, err),
        Commands::Gaps { input } => handle_gaps_command(input, &config, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };
    finish(result, err)
}

/// Handlers print their own user-facing message; this only adds a line for
/// errors that reached here without one (write failures).
fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Io(e)) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
        Err(_) => exit_code::ERROR,
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut report = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "hhreplay: PokerStars hand history replay")?;
        writeln!(err, "Usage: hhreplay <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: hhreplay --help")
    };
    let _ = report();
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_lists_commands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["hhreplay", "deal"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let stderr = String::from_utf8(err).unwrap();
        for c in COMMANDS {
            assert!(stderr.contains(&format!("  {}", c)), "missing {}", c);
        }
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["hhreplay", "--help"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.contains("parse"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_missing_input_file() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            ["hhreplay", "stats", "--input", "/no/such/export.txt"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, exit_code::ERROR);
        assert!(
            String::from_utf8(err)
                .unwrap()
                .starts_with("Error: Failed to read /no/such/export.txt")
        );
    }

    #[test]
    fn test_commands_list_matches_subcommands() {
        for c in COMMANDS {
            let mut args = vec!["hhreplay", c];
            if *c != "cfg" {
                args.extend(["--input", "x"]);
            }
            assert!(HhreplayCli::try_parse_from(&args).is_ok(), "{}", c);
        }
    }
}
