use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::seats::TablePosition;
use crate::summary::SummaryInfo;

/// Represents the phase a line of hand history belongs to.
/// The four betting rounds plus the parsing-only showdown and summary phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreetName {
    /// Forced posts and the first betting round
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Cards shown and pots collected
    Showdown,
    /// The `*** SUMMARY ***` section
    Summary,
}

impl StreetName {
    pub fn as_str(self) -> &'static str {
        match self {
            StreetName::Preflop => "preflop",
            StreetName::Flop => "flop",
            StreetName::Turn => "turn",
            StreetName::River => "river",
            StreetName::Showdown => "showdown",
            StreetName::Summary => "summary",
        }
    }
}

impl fmt::Display for StreetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a live-play line did. Each kind has exactly one grammar rule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Ante,
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    #[serde(rename = "all-in")]
    AllIn,
    Shows,
    Mucks,
    Collected,
}

impl ActionKind {
    pub const ALL: [ActionKind; 12] = [
        ActionKind::Ante,
        ActionKind::SmallBlind,
        ActionKind::BigBlind,
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Bet,
        ActionKind::Raise,
        ActionKind::AllIn,
        ActionKind::Shows,
        ActionKind::Mucks,
        ActionKind::Collected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Ante => "ante",
            ActionKind::SmallBlind => "small_blind",
            ActionKind::BigBlind => "big_blind",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
            ActionKind::Shows => "shows",
            ActionKind::Mucks => "mucks",
            ActionKind::Collected => "collected",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a seated player as listed in the hand's setup section.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Seat number from the `Seat N:` line, unique within a hand
    pub seat: u8,
    /// Chips at the start of the hand
    pub stack: u64,
    pub is_hero: bool,
    pub is_button: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    /// Positional label derived from the button (None when the button is unknown)
    #[serde(default)]
    pub position: Option<TablePosition>,
    #[serde(default)]
    pub sitting_out: bool,
}

/// A single decoded live-play line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
    /// Chips moved by the line; the raise increment for raises
    pub amount: u64,
    /// The player's commitment on this street after the action
    pub total_bet: u64,
    pub street: StreetName,
    /// Position within the street, starting at 0
    pub order: u32,
    /// Revealed cards for `shows` and `mucks`
    #[serde(default)]
    pub cards: Option<String>,
    #[serde(default)]
    pub is_all_in: bool,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.player)?;
        match self.kind {
            ActionKind::Ante => write!(f, "posts the ante {}", self.amount)?,
            ActionKind::SmallBlind => write!(f, "posts small blind {}", self.amount)?,
            ActionKind::BigBlind => write!(f, "posts big blind {}", self.amount)?,
            ActionKind::Fold => f.write_str("folds")?,
            ActionKind::Check => f.write_str("checks")?,
            ActionKind::Call => write!(f, "calls {}", self.amount)?,
            ActionKind::Bet => write!(f, "bets {}", self.amount)?,
            ActionKind::Raise => write!(f, "raises {} to {}", self.amount, self.total_bet)?,
            ActionKind::AllIn => write!(f, "all-in {}", self.amount)?,
            ActionKind::Shows => write!(f, "shows [{}]", self.cards.as_deref().unwrap_or(""))?,
            ActionKind::Mucks => match &self.cards {
                Some(cards) => write!(f, "mucks [{cards}]")?,
                None => f.write_str("mucks")?,
            },
            ActionKind::Collected => write!(f, "collects {}", self.amount)?,
        }
        if self.is_all_in {
            f.write_str(" and is all-in")?;
        }
        Ok(())
    }
}

/// One phase of the hand with its own community cards (not cumulative).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Street {
    pub name: StreetName,
    pub cards: Vec<String>,
    pub actions: Vec<Action>,
}

impl Street {
    pub fn new(name: StreetName) -> Self {
        Street {
            name,
            cards: Vec::new(),
            actions: Vec::new(),
        }
    }
}

/// Chips handed back from an uncalled bet. Kept apart from the street's
/// actions; the returned chips leave the player's street commitment.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct UncalledBet {
    pub player: String,
    pub amount: u64,
    pub street: StreetName,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u64,
    pub big: u64,
    pub ante: u64,
}

/// Where the small/big blind flags on [`Player`] came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlindSource {
    /// Literal `posts small blind` / `posts big blind` lines
    Posted,
    /// Walking the seat list from the button
    Positional,
    /// Neither posts nor a button line
    Unknown,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A known line that carries no replay data (chat, timeouts, setup)
    Informational,
    /// Matches nothing in the grammar
    Unrecognized,
}

/// A non-fatal note attached to a replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A secondary field could not be read and was left empty.
    FieldMissing { field: String },
    /// A body line was dropped; `line_no` is 1-based within the hand.
    SkippedLine {
        line_no: usize,
        text: String,
        reason: SkipReason,
    },
    DuplicateSeat { seat: u8, name: String },
    /// A street marker at or before the current street.
    OutOfOrderMarker { line_no: usize, marker: StreetName },
    /// `Dealt to` names a player without a seat line.
    UnseatedHero { name: String },
}

impl Diagnostic {
    pub fn field_missing(field: &str) -> Self {
        Diagnostic::FieldMissing {
            field: field.to_string(),
        }
    }
}

/// The fully reconstructed hand.
///
/// Built once from the hand's text by [`crate::replay::HandParser`]; nothing
/// in the engine changes it afterwards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandReplay {
    pub hand_id: String,
    pub tournament_id: Option<String>,
    pub table_name: Option<String>,
    /// Game description between the ids and the blinds, e.g. `Hold'em No Limit`
    pub game: String,
    /// Roman numeral blind level
    pub level: Option<String>,
    /// Wall-clock time printed in the header, in the site's zone
    pub timestamp: Option<NaiveDateTime>,
    pub timezone: Option<String>,
    pub max_seats: Option<u8>,
    pub button_seat: Option<u8>,
    pub blinds: Blinds,
    pub blind_source: BlindSource,
    /// Sorted by seat number
    pub players: Vec<Player>,
    pub hero_name: Option<String>,
    pub hero_cards: Vec<String>,
    pub streets: Vec<Street>,
    #[serde(default)]
    pub uncalled: Vec<UncalledBet>,
    pub winner: Option<String>,
    pub winning_hand: Option<String>,
    pub pot_total: Option<u64>,
    pub summary: SummaryInfo,
    pub gaps: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl HandReplay {
    pub fn street(&self, name: StreetName) -> Option<&Street> {
        self.streets.iter().find(|s| s.name == name)
    }

    pub fn hero(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_hero)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Every action of the hand in source order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.streets.iter().flat_map(|s| s.actions.iter())
    }

    pub fn hero_actions(&self) -> impl Iterator<Item = &Action> {
        let hero = self.hero_name.as_deref();
        self.actions()
            .filter(move |a| Some(a.player.as_str()) == hero)
    }

    /// The full board: flop, turn and river reveals, or the summary board
    /// when the streets carry no cards.
    pub fn board(&self) -> Vec<String> {
        let dealt: Vec<String> = self
            .streets
            .iter()
            .filter(|s| {
                matches!(
                    s.name,
                    StreetName::Flop | StreetName::Turn | StreetName::River
                )
            })
            .flat_map(|s| s.cards.iter().cloned())
            .collect();
        if dealt.is_empty() {
            self.summary.board.clone()
        } else {
            dealt
        }
    }

    /// Lines that matched nothing in the grammar.
    pub fn unrecognized_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::SkippedLine {
                line_no,
                text,
                reason: SkipReason::Unrecognized,
            } => Some((*line_no, text.as_str())),
            _ => None,
        })
    }
}
