//! Street/action state machine.
//!
//! [`step`] is the pure transition function over [`StreetState`]; a
//! [`StreetMachine`] drives it line by line, owns the street being built and
//! hands back each finished [`Street`] when the next marker arrives.

use std::collections::HashMap;

use crate::cards::{bracket_groups, split_cards};
use crate::grammar::{grammar, ParsedAction};
use crate::model::{Action, ActionKind, Diagnostic, SkipReason, Street, StreetName, UncalledBet};
use crate::summary::{parse_summary_line, SummaryInfo};

/// Parser state. Strictly linear; any state may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StreetState {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Summary,
}

impl StreetState {
    pub fn street_name(self) -> StreetName {
        match self {
            StreetState::Preflop => StreetName::Preflop,
            StreetState::Flop => StreetName::Flop,
            StreetState::Turn => StreetName::Turn,
            StreetState::River => StreetName::River,
            StreetState::Showdown => StreetName::Showdown,
            StreetState::Summary => StreetName::Summary,
        }
    }

    fn from_marker(marker: &str) -> Option<StreetState> {
        match marker {
            "HOLE CARDS" => Some(StreetState::Preflop),
            "FLOP" => Some(StreetState::Flop),
            "TURN" => Some(StreetState::Turn),
            "RIVER" => Some(StreetState::River),
            "SHOW DOWN" | "SHOWDOWN" => Some(StreetState::Showdown),
            "SUMMARY" => Some(StreetState::Summary),
            _ => None,
        }
    }
}

/// Outcome of feeding one line to the transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not a marker; the line belongs to the current street.
    Body,
    /// `*** HOLE CARDS ***` while still preflop.
    Acknowledged,
    /// Move to `to`; `cards` are the newly revealed community cards.
    Advance { to: StreetState, cards: Vec<String> },
    /// A marker for a state at or before the current one.
    OutOfOrder { marker: StreetState },
}

/// The transition function: `(state, line) -> step`.
pub fn step(state: StreetState, line: &str) -> Step {
    let Some(target) = grammar()
        .marker
        .captures(line)
        .and_then(|caps| StreetState::from_marker(caps.name("marker")?.as_str()))
    else {
        return Step::Body;
    };
    if target == StreetState::Preflop && state == StreetState::Preflop {
        return Step::Acknowledged;
    }
    if target <= state {
        return Step::OutOfOrder { marker: target };
    }
    Step::Advance {
        to: target,
        cards: revealed_cards(target, line),
    }
}

/// The street's own reveal: three flop cards, or the newest turn/river card.
fn revealed_cards(target: StreetState, line: &str) -> Vec<String> {
    let groups = bracket_groups(line);
    match target {
        StreetState::Flop => {
            let cards = groups.first().map(|g| split_cards(g)).unwrap_or_default();
            if cards.len() == 3 { cards } else { Vec::new() }
        }
        StreetState::Turn | StreetState::River => groups
            .last()
            .and_then(|g| split_cards(g).pop())
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Accumulates one street's actions and each player's commitment on it.
#[derive(Debug)]
pub struct StreetBuilder {
    street: Street,
    committed: HashMap<String, u64>,
}

impl StreetBuilder {
    pub fn new(name: StreetName, cards: Vec<String>) -> Self {
        let mut street = Street::new(name);
        street.cards = cards;
        StreetBuilder {
            street,
            committed: HashMap::new(),
        }
    }

    pub fn name(&self) -> StreetName {
        self.street.name
    }

    /// Appends a decoded line, computing `total_bet` and the per-street order.
    pub fn push(&mut self, parsed: ParsedAction) {
        let prior = self.committed.get(&parsed.player).copied().unwrap_or(0);
        let (amount, total_bet, committed) = match parsed.kind {
            ActionKind::Ante => (parsed.amount, parsed.amount, prior),
            ActionKind::SmallBlind
            | ActionKind::BigBlind
            | ActionKind::Call
            | ActionKind::Bet
            | ActionKind::AllIn => {
                let total = prior.saturating_add(parsed.amount);
                (parsed.amount, total, total)
            }
            ActionKind::Raise => {
                let to = parsed
                    .raise_to
                    .unwrap_or(prior.saturating_add(parsed.amount));
                (parsed.amount, to, to)
            }
            ActionKind::Fold | ActionKind::Check | ActionKind::Shows | ActionKind::Mucks => {
                (0, prior, prior)
            }
            ActionKind::Collected => (parsed.amount, parsed.amount, prior),
        };
        self.committed.insert(parsed.player.clone(), committed);

        let order = self.street.actions.len() as u32;
        self.street.actions.push(Action {
            player: parsed.player,
            kind: parsed.kind,
            amount,
            total_bet,
            street: self.street.name,
            order,
            cards: parsed.cards,
            is_all_in: parsed.is_all_in,
        });
    }

    /// Takes an uncalled bet back out of `player`'s commitment.
    pub fn refund(&mut self, player: &str, amount: u64) {
        if let Some(c) = self.committed.get_mut(player) {
            *c = c.saturating_sub(amount);
        }
    }

    pub fn finish(self) -> Street {
        self.street
    }
}

/// Everything the machine collected once the input is exhausted.
#[derive(Debug, Default)]
pub struct StreetOutput {
    pub streets: Vec<Street>,
    pub uncalled: Vec<UncalledBet>,
    pub summary: SummaryInfo,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct StreetMachine<'a> {
    seated: Vec<&'a str>,
    state: StreetState,
    builder: StreetBuilder,
    finished: Vec<Street>,
    uncalled: Vec<UncalledBet>,
    summary: SummaryInfo,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> StreetMachine<'a> {
    /// `seated` names resolve the actor of `NAME: verb` lines.
    pub fn new(seated: Vec<&'a str>) -> Self {
        StreetMachine {
            seated,
            state: StreetState::Preflop,
            builder: StreetBuilder::new(StreetName::Preflop, Vec::new()),
            finished: Vec::new(),
            uncalled: Vec::new(),
            summary: SummaryInfo::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn state(&self) -> StreetState {
        self.state
    }

    /// Feeds one line (`line_no` is 1-based within the hand). Returns the
    /// finished street when the line moves the machine to a new state.
    pub fn feed(&mut self, line_no: usize, line: &str) -> Option<&Street> {
        if line.is_empty() {
            return None;
        }
        match step(self.state, line) {
            Step::Advance { to, cards } => {
                self.state = to;
                let next = StreetBuilder::new(to.street_name(), cards);
                let done = std::mem::replace(&mut self.builder, next).finish();
                self.finished.push(done);
                self.finished.last()
            }
            Step::Acknowledged => None,
            Step::OutOfOrder { marker } => {
                self.diagnostics.push(Diagnostic::OutOfOrderMarker {
                    line_no,
                    marker: marker.street_name(),
                });
                None
            }
            Step::Body => {
                self.body_line(line_no, line);
                None
            }
        }
    }

    fn body_line(&mut self, line_no: usize, line: &str) {
        let g = grammar();
        if self.state == StreetState::Summary {
            match parse_summary_line(g, line) {
                Some(parsed) => self.summary.apply(parsed),
                None => self.skip(line_no, line, SkipReason::Unrecognized),
            }
            return;
        }
        if let Some(parsed) = g.match_action(line, &self.seated) {
            self.builder.push(parsed);
        } else if let Some((player, amount)) = g.match_uncalled(line) {
            self.builder.refund(&player, amount);
            self.uncalled.push(UncalledBet {
                player,
                amount,
                street: self.builder.name(),
            });
        } else if g.is_informational(line) {
            self.skip(line_no, line, SkipReason::Informational);
        } else {
            self.skip(line_no, line, SkipReason::Unrecognized);
        }
    }

    fn skip(&mut self, line_no: usize, line: &str, reason: SkipReason) {
        if reason == SkipReason::Unrecognized {
            tracing::debug!(line_no, text = line, "skipped unrecognized line");
        }
        self.diagnostics.push(Diagnostic::SkippedLine {
            line_no,
            text: line.to_string(),
            reason,
        });
    }

    pub fn finish(mut self) -> StreetOutput {
        self.finished.push(self.builder.finish());
        StreetOutput {
            streets: self.finished,
            uncalled: self.uncalled,
            summary: self.summary,
            diagnostics: self.diagnostics,
        }
    }
}

/// Runs the machine over `lines`, numbering them from `first_line_no`.
pub fn parse_streets<'a, I>(seated: Vec<&'a str>, lines: I, first_line_no: usize) -> StreetOutput
where
    I: IntoIterator<Item = &'a str>,
{
    let mut machine = StreetMachine::new(seated);
    for (offset, line) in lines.into_iter().enumerate() {
        if let Some(done) = machine.feed(first_line_no + offset, line) {
            tracing::trace!(street = %done.name, actions = done.actions.len(), "street finished");
        }
    }
    machine.finish()
}
