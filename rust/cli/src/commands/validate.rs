//! Validate command: the language pre-pass on its own.

use hhreplay_engine::language::check_language;
use std::io::Write;

use super::read_input;
use crate::error::CliError;
use crate::ui;

/// Prints the language report as JSON. Anything but a complete English
/// export is an error.
pub fn handle_validate_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let text = read_input(&input, err)?;
    let report = check_language(&text);

    let display = serde_json::json!({
        "language": report.language,
        "is_valid": report.is_valid,
        "missing": report.missing,
        "message": report.message(),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;

    if report.is_valid {
        Ok(())
    } else {
        let msg = report.message();
        ui::write_error(err, &msg)?;
        Err(CliError::InvalidInput(msg))
    }
}
