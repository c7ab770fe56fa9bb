//! Parse command handler.
//!
//! Batch-parses an export and writes one flat record per parsed hand to
//! stdout or `--output`. Processed and skipped counts go to stderr; a file
//! with no parseable hand exits with `no valid hands found`.

use hhreplay_engine::batch::BatchReport;
use hhreplay_engine::language::check_language;
use std::io::Write;

use super::{parse_text, read_input, require_hands};
use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use crate::writer::{OutputFormat, ViewWriter};

pub fn handle_parse_command(
    input: String,
    format: OutputFormat,
    output: Option<String>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let text = read_input(&input, err)?;

    if config.language_check {
        let report = check_language(&text);
        if !report.is_valid {
            let msg = report.message();
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    }

    let report = parse_text(&text, config);
    ui::write_batch_summary(err, &report)?;
    let report = require_hands(report, err)?;

    let fallback = config.timestamp_fallback.resolve();
    let written = match output {
        Some(path) => {
            let writer = ViewWriter::create(&path, format, fallback).map_err(|e| {
                let msg = format!("Failed to create {}: {}", path, e);
                let _ = ui::write_error(err, &msg);
                CliError::InvalidInput(msg)
            })?;
            write_all(writer, &report)?
        }
        None => write_all(ViewWriter::new(out, format, fallback), &report)?,
    };
    tracing::debug!(written, "records written");
    Ok(())
}

fn write_all<W: Write>(mut writer: ViewWriter<W>, report: &BatchReport) -> Result<usize, CliError> {
    for replay in &report.replays {
        writer.write(replay)?;
    }
    Ok(writer.finish()?)
}
