//! Parsing a whole export, one hand at a time.

use serde::Serialize;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::errors::{BatchError, RejectReason};
use crate::model::HandReplay;
use crate::replay::HandParser;
use crate::segment::{segment_detailed, Fragment, SegmenterConfig};

/// A block that did not produce a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedHand {
    /// Position of the block among all fragments of the input, from 0
    pub index: usize,
    pub reason: RejectReason,
    /// First line of the block, for reporting
    pub first_line: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub replays: Vec<HandReplay>,
    pub skipped: Vec<SkippedHand>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.replays.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Reject counts keyed by [`RejectReason::key`].
    pub fn reasons(&self) -> BTreeMap<&'static str, usize> {
        let mut out = BTreeMap::new();
        for s in &self.skipped {
            *out.entry(s.reason.key()).or_insert(0) += 1;
        }
        out
    }

    /// Fails when nothing in the input could be parsed.
    pub fn into_result(self) -> Result<BatchReport, BatchError> {
        if self.replays.is_empty() {
            return Err(BatchError::NoValidHands {
                skipped: self.skipped.len(),
            });
        }
        Ok(self)
    }
}

/// Segments `text` and parses every block. A block that fails, including by
/// panicking, is recorded in [`BatchReport::skipped`] and the batch goes on.
pub fn parse_batch(text: &str, parser: &HandParser, segmenter: &SegmenterConfig) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, fragment) in segment_detailed(text, segmenter).into_iter().enumerate() {
        let block = fragment.text();
        let outcome = match fragment {
            Fragment::Hand(block) => contained(|| parser.parse(block)),
            Fragment::Headerless(_) => Err(RejectReason::MissingHeader),
        };
        match outcome {
            Ok(replay) => report.replays.push(replay),
            Err(reason) => {
                let first_line = block.lines().next().unwrap_or("").trim().to_string();
                tracing::warn!(index, reason = %reason, first_line = %first_line, "hand rejected");
                report.skipped.push(SkippedHand {
                    index,
                    reason,
                    first_line,
                });
            }
        }
    }
    tracing::info!(
        processed = report.processed(),
        skipped = report.skipped_count(),
        "batch parsed"
    );
    report
}

/// Runs one hand's parse, turning a panic into [`RejectReason::Internal`].
fn contained<F>(parse: F) -> Result<HandReplay, RejectReason>
where
    F: FnOnce() -> Result<HandReplay, RejectReason>,
{
    match catch_unwind(AssertUnwindSafe(parse)) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic while parsing hand".to_string());
            Err(RejectReason::Internal(msg))
        }
    }
}

/// Parses an upload and fails with [`BatchError::NoValidHands`] when no hand
/// could be read.
pub fn parse_upload(
    text: &str,
    parser: &HandParser,
    segmenter: &SegmenterConfig,
) -> Result<BatchReport, BatchError> {
    parse_batch(text, parser, segmenter).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "PokerStars Hand #10: Tournament #1, Hold'em No Limit - Level I (10/20) - 2025/07/30 20:13:26 ET\nTable '1 1' 9-max Seat #1 is the button\nSeat 1: a (1500 in chips)\nSeat 2: b (1500 in chips)\na: posts small blind 10\nb: posts big blind 20\n*** HOLE CARDS ***\na: folds\nUncalled bet (10) returned to b\nb collected 20 from pot";

    #[test]
    fn empty_input_has_no_valid_hands() {
        let err = parse_upload("", &HandParser::new(), &SegmenterConfig::default()).unwrap_err();
        assert_eq!(err, BatchError::NoValidHands { skipped: 0 });
    }

    #[test]
    fn rejects_are_tallied() {
        let no_seats = "PokerStars Hand #11: Tournament #1, Hold'em No Limit - Level I (10/20) - 2025/07/30 20:14:00 ET\n*** HOLE CARDS ***\na: folds";
        let text = format!("{GOOD}\n\n\n{no_seats}\n");
        let report = parse_batch(&text, &HandParser::new(), &SegmenterConfig::default());
        assert_eq!(report.processed(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.skipped[0].reason, RejectReason::NoSeats);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.reasons().get("no_seats"), Some(&1));
    }

    #[test]
    fn panics_are_contained() {
        assert_eq!(
            contained(|| panic!("boom")).unwrap_err(),
            RejectReason::Internal("boom".into())
        );
        let owned = contained(|| std::panic::panic_any(format!("bad {}", 7)));
        assert_eq!(owned.unwrap_err(), RejectReason::Internal("bad 7".into()));
        let parser = HandParser::new();
        assert!(contained(|| parser.parse(GOOD)).is_ok());
    }
}
