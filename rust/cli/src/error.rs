//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! any error to exit code `2`.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item failures with context. `verify`
//! uses it to report every hand that breaks a replay invariant.

use hhreplay_engine::BatchError;
use std::fmt;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input, unreadable files or failed checks
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// The parsing engine produced nothing usable
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}

impl From<BatchError> for CliError {
    fn from(error: BatchError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// Generic error type for batch validation operations.
///
/// # Type Parameters
///
/// * `T` - Context type identifying the failed item (e.g. a hand id). Must
///   implement `Display` for error formatting.
///
/// # Examples
///
/// ```rust
/// use hhreplay_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: "257152017277".to_string(),
///     message: "seat numbers not ascending".to_string(),
/// };
/// assert_eq!(error.to_string(), "257152017277: seat numbers not ascending");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_validation_error_with_index() {
        let error = BatchValidationError {
            item_context: 3,
            message: "flop has 2 cards".to_string(),
        };
        assert_eq!(error.to_string(), "3: flop has 2 cards");
    }

    #[test]
    fn test_batch_error_maps_to_engine() {
        let e: CliError = BatchError::NoValidHands { skipped: 2 }.into();
        assert!(matches!(e, CliError::Engine(_)));
        assert_eq!(
            e.to_string(),
            "Engine error: no valid hands found (2 skipped)"
        );
    }
}
