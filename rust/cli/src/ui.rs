//! UI helper functions for terminal output formatting.

use hhreplay_engine::batch::BatchReport;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Processed/skipped counts for a batch, followed by one line per rejected
/// block.
pub fn write_batch_summary(err: &mut dyn Write, report: &BatchReport) -> std::io::Result<()> {
    writeln!(
        err,
        "Processed {} hand(s), skipped {}",
        report.processed(),
        report.skipped_count()
    )?;
    for s in &report.skipped {
        display_warning(
            err,
            &format!("block {} skipped ({}): {}", s.index, s.reason, s.first_line),
        )?;
    }
    Ok(())
}
