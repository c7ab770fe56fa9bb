//! The `*** SUMMARY ***` side-channel.
//!
//! Summary lines restate the outcome in their own syntax (`Seat 3: x showed
//! [..] and won (1,200)`), so they are decoded here instead of by the
//! live-play action rules.

use serde::{Deserialize, Serialize};

use crate::cards::split_cards;
use crate::grammar::{parse_chips, Grammar};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SeatResult {
    Won {
        cards: Vec<String>,
        amount: u64,
        hand: Option<String>,
    },
    Lost {
        cards: Vec<String>,
        hand: Option<String>,
    },
    Collected {
        amount: u64,
    },
    Mucked {
        cards: Vec<String>,
    },
    /// `when` is the rest of the line, e.g. `before Flop (didn't bet)`
    Folded {
        when: String,
    },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatOutcome {
    pub seat: u8,
    pub player: String,
    pub result: SeatResult,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SummaryInfo {
    pub total_pot: Option<u64>,
    pub rake: Option<u64>,
    pub board: Vec<String>,
    pub outcomes: Vec<SeatOutcome>,
}

impl SummaryInfo {
    /// First seat that won or collected chips.
    pub fn winner(&self) -> Option<&SeatOutcome> {
        self.outcomes.iter().find(|o| {
            matches!(
                o.result,
                SeatResult::Won { .. } | SeatResult::Collected { .. }
            )
        })
    }

    pub fn winning_hand(&self) -> Option<&str> {
        self.outcomes.iter().find_map(|o| match &o.result {
            SeatResult::Won { hand, .. } => hand.as_deref(),
            _ => None,
        })
    }

    pub(crate) fn apply(&mut self, line: SummaryLine) {
        match line {
            SummaryLine::TotalPot { pot, rake } => {
                self.total_pot = Some(pot);
                self.rake = rake;
            }
            SummaryLine::Board(cards) => self.board = cards,
            SummaryLine::Seat(outcome) => self.outcomes.push(outcome),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SummaryLine {
    TotalPot { pot: u64, rake: Option<u64> },
    Board(Vec<String>),
    Seat(SeatOutcome),
}

pub fn parse_summary_line(g: &Grammar, line: &str) -> Option<SummaryLine> {
    if let Some(caps) = g.total_pot.captures(line) {
        return Some(SummaryLine::TotalPot {
            pot: parse_chips(caps.name("pot")?.as_str())?,
            rake: caps.name("rake").and_then(|m| parse_chips(m.as_str())),
        });
    }
    if let Some(caps) = g.board.captures(line) {
        return Some(SummaryLine::Board(split_cards(caps.name("cards")?.as_str())));
    }
    let caps = g.summary_seat.captures(line)?;
    let seat: u8 = caps.name("seat")?.as_str().parse().ok()?;
    let rest = caps.name("rest")?.as_str();

    let outcome = g.summary_outcome.captures(rest)?;
    let mut player = &rest[..outcome.get(0)?.start()];
    while let Some(role) = g.summary_roles.find(player) {
        player = &player[..role.start()];
    }

    let result = if let Some(cards) = outcome.name("shown") {
        let cards = split_cards(cards.as_str());
        let hand = outcome.name("desc").map(|m| m.as_str().trim().to_string());
        match outcome.name("won") {
            Some(won) => SeatResult::Won {
                cards,
                amount: parse_chips(won.as_str())?,
                hand,
            },
            None => SeatResult::Lost { cards, hand },
        }
    } else if let Some(amount) = outcome.name("collected") {
        SeatResult::Collected {
            amount: parse_chips(amount.as_str())?,
        }
    } else if let Some(when) = outcome.name("folded") {
        SeatResult::Folded {
            when: when.as_str().trim().to_string(),
        }
    } else {
        SeatResult::Mucked {
            cards: outcome
                .name("mucked")
                .map(|m| split_cards(m.as_str()))
                .unwrap_or_default(),
        }
    };

    Some(SummaryLine::Seat(SeatOutcome {
        seat,
        player: player.trim().to_string(),
        result,
    }))
}
