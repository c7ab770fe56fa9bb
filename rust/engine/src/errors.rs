use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a whole hand was discarded (the `StructuralReject` class).
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("hand header not found")]
    MissingHeader,
    #[error("no seat lines found")]
    NoSeats,
    #[error("no seated hero (Dealt to) found")]
    MissingHero,
    #[error("internal parser failure: {0}")]
    Internal(String),
}

impl RejectReason {
    /// Stable key used when tallying rejects by reason.
    pub fn key(&self) -> &'static str {
        match self {
            RejectReason::MissingHeader => "missing_header",
            RejectReason::NoSeats => "no_seats",
            RejectReason::MissingHero => "missing_hero",
            RejectReason::Internal(_) => "internal",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no valid hands found ({skipped} skipped)")]
    NoValidHands { skipped: usize },
}
