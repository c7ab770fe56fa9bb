//! Statistics command: a JSON summary of one export.
//!
//! Reports parsed and skipped hands (by reject reason), the number of body
//! lines nothing in the grammar recognised, the hero's action counts and the
//! number of review hints.

use hhreplay_engine::batch::BatchReport;
use std::collections::BTreeMap;
use std::io::Write;

use super::load_hands;
use crate::config::Config;
use crate::error::CliError;

pub fn handle_stats_command(
    input: String,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let report = load_hands(&input, config, err)?;
    let summary = summarize(&report);
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}

fn summarize(report: &BatchReport) -> serde_json::Value {
    let mut hero_actions: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut unrecognized = 0usize;
    let mut gaps = 0usize;
    let mut with_hero = 0usize;
    let mut showdowns = 0usize;

    for replay in &report.replays {
        for a in replay.hero_actions() {
            *hero_actions.entry(a.kind.as_str()).or_insert(0) += 1;
        }
        unrecognized += replay.unrecognized_lines().count();
        gaps += replay.gaps.len();
        if replay.hero_name.is_some() {
            with_hero += 1;
        }
        if replay.winning_hand.is_some() {
            showdowns += 1;
        }
    }

    serde_json::json!({
        "hands": report.processed(),
        "skipped": report.skipped_count(),
        "skipped_by_reason": report.reasons(),
        "unrecognized_lines": unrecognized,
        "hands_with_hero": with_hero,
        "showdowns": showdowns,
        "hero_actions": hero_actions,
        "gaps": gaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hhreplay_engine::HandParser;
    use hhreplay_engine::batch::parse_batch;
    use hhreplay_engine::segment::SegmenterConfig;

    #[test]
    fn counts_hero_actions_and_rejects() {
        let text = "PokerStars Hand #1: Tournament #2, Hold'em No Limit - Level I (10/20) - 2025/07/30 20:13:26 ET\nTable '2 1' 9-max Seat #1 is the button\nSeat 1: a (1500 in chips)\nSeat 2: b (1500 in chips)\na: posts small blind 10\nb: posts big blind 20\n*** HOLE CARDS ***\nDealt to a [9c 8c]\na: calls 10\nb: checks\n*** FLOP *** [7s 3d 2d]\nb: bets 20\na: folds\nUncalled bet (20) returned to b\nb collected 40 from pot\n\n\n\nPokerStars Hand #2: Tournament #2, Hold'em No Limit - Level I (10/20) - 2025/07/30 20:14:26 ET\n*** HOLE CARDS ***\na: folds\n";
        let report = parse_batch(text, &HandParser::new(), &SegmenterConfig::default());
        let v = summarize(&report);
        assert_eq!(v["hands"], 1);
        assert_eq!(v["skipped"], 1);
        assert_eq!(v["skipped_by_reason"]["no_seats"], 1);
        assert_eq!(v["hero_actions"]["small_blind"], 1);
        assert_eq!(v["hero_actions"]["call"], 1);
        assert_eq!(v["hero_actions"]["fold"], 1);
        assert_eq!(v["unrecognized_lines"], 0);
        assert_eq!(v["gaps"], 1);
    }
}
