//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of each value
//! (default, configuration file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "require_hero": {
//!     "value": false,
//!     "source": "default"
//!   },
//!   "min_block_len": {
//!     "value": 40,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "require_hero": {
            "value": config.require_hero,
            "source": sources.require_hero,
        },
        "min_block_len": {
            "value": config.min_block_len,
            "source": sources.min_block_len,
        },
        "timestamp_fallback": {
            "value": config.timestamp_fallback,
            "source": sources.timestamp_fallback,
        },
        "language_check": {
            "value": config.language_check,
            "source": sources.language_check,
        },
        "log_filter": {
            "value": config.log_filter,
            "source": sources.log_filter,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
