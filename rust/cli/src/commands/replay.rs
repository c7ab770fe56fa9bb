//! Replay command handler.
//!
//! Walks each hand's playback event sequence and prints it as a
//! step-by-step text replay with a running pot.
//!
//! ## Format
//!
//! ```text
//! Hand #257152017277 (Tournament #3914216809, Level I, Table '3914216809 1')
//! ═══════════════════════════════════════
//! Blinds: SB=10 BB=20 Ante=0
//! Seat 1: ...
//! *** PREFLOP ***
//!   [0] Vinao182 posts small blind 10  (pot 10)
//! ```

use hhreplay_engine::HandReplay;
use hhreplay_engine::model::{ActionKind, StreetName};
use hhreplay_engine::replay::PlaybackEvent;
use std::collections::HashMap;
use std::io::Write;

use super::load_hands;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_cards, format_player, format_street};
use crate::ui;

pub fn handle_replay_command(
    input: String,
    hand: Option<String>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let report = load_hands(&input, config, err)?;

    let selected: Vec<&HandReplay> = report
        .replays
        .iter()
        .filter(|r| hand.as_deref().is_none_or(|id| r.hand_id == id))
        .collect();

    if let Some(id) = &hand
        && selected.is_empty()
    {
        let msg = format!("hand {} not found in {}", id, input);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    for (i, replay) in selected.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_replay(replay, out)?;
    }
    if !report.skipped.is_empty() {
        ui::display_warning(
            err,
            &format!("{} block(s) could not be parsed", report.skipped_count()),
        )?;
    }
    Ok(())
}

/// Running pot for one hand. Commitments reset per street.
#[derive(Default)]
struct Playback {
    pot: u64,
    street: Option<StreetName>,
    committed: HashMap<String, u64>,
    refunded: bool,
}

impl Playback {
    fn enter(&mut self, street: StreetName) {
        self.street = Some(street);
        self.committed.clear();
        self.refunded = false;
    }

    fn apply(&mut self, player: &str, kind: ActionKind, amount: u64, total_bet: u64) {
        match kind {
            ActionKind::Ante => self.pot = self.pot.saturating_add(amount),
            ActionKind::SmallBlind
            | ActionKind::BigBlind
            | ActionKind::Call
            | ActionKind::Bet
            | ActionKind::Raise
            | ActionKind::AllIn => {
                let prior = self.committed.get(player).copied().unwrap_or(0);
                self.pot = self.pot.saturating_add(total_bet.saturating_sub(prior));
                self.committed.insert(player.to_string(), total_bet.max(prior));
            }
            _ => {}
        }
    }

    fn refund(&mut self, amount: u64) {
        self.pot = self.pot.saturating_sub(amount);
    }
}

fn write_replay(replay: &HandReplay, out: &mut dyn Write) -> Result<(), CliError> {
    let mut title = format!("Hand #{}", replay.hand_id);
    let mut details = Vec::new();
    if let Some(t) = &replay.tournament_id {
        details.push(format!("Tournament #{}", t));
    }
    if let Some(l) = &replay.level {
        details.push(format!("Level {}", l));
    }
    if let Some(t) = &replay.table_name {
        details.push(format!("Table '{}'", t));
    }
    if !details.is_empty() {
        title.push_str(&format!(" ({})", details.join(", ")));
    }
    writeln!(out, "{}", title)?;
    writeln!(out, "═══════════════════════════════════════")?;

    let mut playback = Playback::default();
    for event in replay.action_sequence() {
        match event {
            PlaybackEvent::Setup {
                players,
                blinds,
                hero_cards,
            } => {
                writeln!(
                    out,
                    "Blinds: SB={} BB={} Ante={}",
                    blinds.small, blinds.big, blinds.ante
                )?;
                for p in &players {
                    writeln!(out, "{}", format_player(p))?;
                }
                if let Some(hero) = &replay.hero_name {
                    writeln!(out, "Hero: {} {}", hero, format_cards(&hero_cards))?;
                }
            }
            PlaybackEvent::CommunityCards { street, cards } => {
                close_street(replay, &mut playback, out)?;
                playback.enter(street);
                writeln!(out, "{}", format_street(street, &cards))?;
            }
            PlaybackEvent::Action {
                street,
                player,
                action,
                amount,
                total_bet,
                timestamp,
            } => {
                if playback.street != Some(street) {
                    close_street(replay, &mut playback, out)?;
                    playback.enter(street);
                    writeln!(out, "{}", format_street(street, &[]))?;
                }
                if action == ActionKind::Collected {
                    close_street(replay, &mut playback, out)?;
                }
                playback.apply(&player, action, amount, total_bet);
                writeln!(
                    out,
                    "  [{}] {} {}  (pot {})",
                    timestamp,
                    player,
                    format_action(action, amount, total_bet),
                    playback.pot
                )?;
            }
        }
    }
    close_street(replay, &mut playback, out)?;

    match (&replay.winner, &replay.winning_hand) {
        (Some(w), Some(h)) => writeln!(out, "Winner: {} with {}", w, h)?,
        (Some(w), None) => writeln!(out, "Winner: {}", w)?,
        _ => writeln!(out, "Winner: unknown")?,
    }
    if let Some(total) = replay.pot_total {
        writeln!(out, "Total pot: {}", total)?;
    }
    Ok(())
}

/// Prints uncalled bets returned on the current street, once, before the
/// street's first collect or when the street is left.
fn close_street(
    replay: &HandReplay,
    playback: &mut Playback,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(street) = playback.street else {
        return Ok(());
    };
    if playback.refunded {
        return Ok(());
    }
    playback.refunded = true;
    for u in replay.uncalled.iter().filter(|u| u.street == street) {
        playback.refund(u.amount);
        writeln!(
            out,
            "  Uncalled bet ({}) returned to {}  (pot {})",
            u.amount, u.player, playback.pot
        )?;
    }
    Ok(())
}
