//! Verify command handler.
//!
//! Parses an export and checks every replay for structural consistency:
//!
//! - Hand id is the numeric id from the header
//! - Seat numbers are unique and ascending
//! - Exactly one hero when a `Dealt to` player is seated, none otherwise
//! - Button, small blind and big blind on different players, except the
//!   heads-up button who also posts the small blind
//! - Action order restarts at 0 on every street and increases by one
//! - Flop shows 0 or 3 cards, turn and river 0 or 1
//! - Streets appear in play order
//! - No body line went unrecognised
//!
//! Errors are collected using the shared `BatchValidationError` pattern.

use hhreplay_engine::HandReplay;
use hhreplay_engine::model::StreetName;
use std::collections::HashSet;
use std::io::Write;

use super::load_hands;
use crate::config::Config;
use crate::error::{BatchValidationError, CliError};
use crate::ui;

type VerifyError = BatchValidationError<String>;

pub fn handle_verify_command(
    input: String,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let report = load_hands(&input, config, err)?;
    let hands = report.processed();

    for s in &report.skipped {
        ui::display_warning(err, &format!("block {} skipped: {}", s.index, s.reason))?;
    }

    let errors: Vec<VerifyError> = report
        .replays
        .iter()
        .flat_map(|r| {
            check_replay(r).into_iter().map(|message| VerifyError {
                item_context: r.hand_id.clone(),
                message,
            })
        })
        .collect();

    if errors.is_empty() {
        writeln!(out, "Verify: OK (hands={})", hands)?;
        return Ok(());
    }

    writeln!(out, "Verify: FAIL (hands={})", hands)?;
    writeln!(err)?;
    writeln!(err, "Errors found:")?;
    for error in &errors {
        writeln!(err, "  Hand {}", error)?;
    }
    writeln!(err)?;
    let invalid: HashSet<&str> = errors.iter().map(|e| e.item_context.as_str()).collect();
    writeln!(
        err,
        "Summary: {} error(s) in {} hands ({} invalid hands)",
        errors.len(),
        hands,
        invalid.len()
    )?;
    Err(CliError::InvalidInput(format!(
        "{} validation errors found",
        errors.len()
    )))
}

/// Every consistency problem found in one replay; empty when it is sound.
pub fn check_replay(replay: &HandReplay) -> Vec<String> {
    let mut problems = Vec::new();

    if replay.hand_id.is_empty() || !replay.hand_id.bytes().all(|b| b.is_ascii_digit()) {
        problems.push(format!("hand id {:?} is not numeric", replay.hand_id));
    }

    if replay.players.is_empty() {
        problems.push("no seated players".to_string());
    }
    for pair in replay.players.windows(2) {
        if pair[0].seat >= pair[1].seat {
            problems.push(format!(
                "seat {} listed after seat {}",
                pair[1].seat, pair[0].seat
            ));
        }
    }

    let heroes = replay.players.iter().filter(|p| p.is_hero).count();
    match &replay.hero_name {
        Some(name) => {
            if heroes != 1 || replay.hero().map(|h| &h.name) != Some(name) {
                problems.push(format!("expected {} as the only hero, found {}", name, heroes));
            }
        }
        None if heroes > 0 => problems.push(format!("{} hero flag(s) without a hero", heroes)),
        None => {}
    }

    let heads_up = replay.players.len() == 2;
    for p in &replay.players {
        let roles = [p.is_button, p.is_small_blind, p.is_big_blind]
            .iter()
            .filter(|r| **r)
            .count();
        let heads_up_button = heads_up && p.is_button && p.is_small_blind && !p.is_big_blind;
        if roles > 1 && !heads_up_button {
            problems.push(format!("{} holds more than one of button/SB/BB", p.name));
        }
    }

    for pair in replay.streets.windows(2) {
        if pair[0].name >= pair[1].name {
            problems.push(format!("{} follows {}", pair[1].name, pair[0].name));
        }
    }

    for street in &replay.streets {
        for (i, a) in street.actions.iter().enumerate() {
            if a.order as usize != i {
                problems.push(format!(
                    "{} action {} has order {}",
                    street.name, i, a.order
                ));
                break;
            }
        }
        let allowed: &[usize] = match street.name {
            StreetName::Flop => &[0, 3],
            StreetName::Turn | StreetName::River => &[0, 1],
            _ => &[0],
        };
        if !allowed.contains(&street.cards.len()) {
            problems.push(format!(
                "{} has {} card(s)",
                street.name,
                street.cards.len()
            ));
        }
    }

    for (line_no, text) in replay.unrecognized_lines() {
        problems.push(format!("unrecognized line {}: {}", line_no, text));
    }

    problems
}
