use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grammar::{parse_chips, Grammar};
use crate::model::{Diagnostic, Player};

/// Table position relative to the button.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TablePosition {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "UTG")]
    UnderTheGun,
    #[serde(rename = "UTG+1")]
    UnderTheGun1,
    #[serde(rename = "UTG+2")]
    UnderTheGun2,
    #[serde(rename = "MP")]
    Middle,
    #[serde(rename = "MP+1")]
    Middle1,
    #[serde(rename = "HJ")]
    Hijack,
    #[serde(rename = "CO")]
    Cutoff,
}

impl TablePosition {
    pub fn label(self) -> &'static str {
        match self {
            TablePosition::Button => "BTN",
            TablePosition::SmallBlind => "SB",
            TablePosition::BigBlind => "BB",
            TablePosition::UnderTheGun => "UTG",
            TablePosition::UnderTheGun1 => "UTG+1",
            TablePosition::UnderTheGun2 => "UTG+2",
            TablePosition::Middle => "MP",
            TablePosition::Middle1 => "MP+1",
            TablePosition::Hijack => "HJ",
            TablePosition::Cutoff => "CO",
        }
    }
}

impl fmt::Display for TablePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels for the seats strictly between the big blind and the button,
/// in action order.
fn middle_labels(count: usize) -> Vec<TablePosition> {
    use TablePosition::*;
    let mut labels = match count {
        0 => vec![],
        1 => vec![UnderTheGun],
        2 => vec![UnderTheGun, Cutoff],
        3 => vec![UnderTheGun, Hijack, Cutoff],
        4 => vec![UnderTheGun, Middle, Hijack, Cutoff],
        5 => vec![UnderTheGun, UnderTheGun1, Middle, Hijack, Cutoff],
        6 => vec![UnderTheGun, UnderTheGun1, UnderTheGun2, Middle, Hijack, Cutoff],
        _ => vec![
            UnderTheGun,
            UnderTheGun1,
            UnderTheGun2,
            Middle,
            Middle1,
            Hijack,
            Cutoff,
        ],
    };
    while labels.len() < count {
        labels.insert(4, Middle1);
    }
    labels
}

#[derive(Debug, Clone, Default)]
pub struct SeatExtraction {
    pub players: Vec<Player>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads the setup `Seat N: name (S in chips)` lines, which all precede the
/// first `*** ` marker. Players come back sorted by seat with button, blind
/// and position flags derived from `button_seat`.
pub fn extract_players(g: &Grammar, lines: &[&str], button_seat: Option<u8>) -> SeatExtraction {
    let mut out = SeatExtraction::default();
    for line in lines.iter().take_while(|l| !l.starts_with("*** ")) {
        let Some(caps) = g.seat.captures(line) else {
            continue;
        };
        let (Some(seat), Some(name), Some(stack)) = (
            caps.name("seat").and_then(|m| m.as_str().parse::<u8>().ok()),
            caps.name("name"),
            caps.name("stack").and_then(|m| parse_chips(m.as_str())),
        ) else {
            continue;
        };
        let name = name.as_str().to_string();
        if out.players.iter().any(|p| p.seat == seat) {
            out.diagnostics.push(Diagnostic::DuplicateSeat { seat, name });
            continue;
        }
        out.players.push(Player {
            name,
            seat,
            stack,
            is_hero: false,
            is_button: false,
            is_small_blind: false,
            is_big_blind: false,
            position: None,
            sitting_out: caps.name("out").is_some(),
        });
    }
    out.players.sort_by_key(|p| p.seat);
    if let Some(button) = button_seat {
        assign_positions(&mut out.players, button);
    }
    out
}

/// Walks the seated players from the button, wrapping over the players
/// present rather than the table's seat numbers.
///
/// Heads-up the button is also the small blind. When the button seat is
/// empty (dead button) nobody is flagged button and the small blind is the
/// first seated player after it.
pub fn assign_positions(players: &mut [Player], button_seat: u8) {
    let n = players.len();
    if n == 0 {
        return;
    }
    let button = players.iter().position(|p| p.seat == button_seat);

    let (sb, bb) = match button {
        Some(b) if n == 1 => {
            players[b].is_button = true;
            players[b].position = Some(TablePosition::Button);
            return;
        }
        Some(b) if n == 2 => (b, (b + 1) % n),
        Some(b) => ((b + 1) % n, (b + 2) % n),
        None if n == 1 => return,
        None => {
            let first = players
                .iter()
                .position(|p| p.seat > button_seat)
                .unwrap_or(0);
            (first, (first + 1) % n)
        }
    };

    players[sb].is_small_blind = true;
    players[bb].is_big_blind = true;
    players[sb].position = Some(TablePosition::SmallBlind);
    players[bb].position = Some(TablePosition::BigBlind);

    if let Some(b) = button {
        players[b].is_button = true;
        players[b].position = Some(TablePosition::Button);
        if n == 2 {
            return;
        }
    }

    let labelled = if button.is_some() { 3 } else { 2 };
    let labels = middle_labels(n.saturating_sub(labelled));
    for (offset, label) in labels.into_iter().enumerate() {
        players[(bb + 1 + offset) % n].position = Some(label);
    }
}

/// Re-derives position labels once the blind flags come from posted blinds.
///
/// The button keeps `BTN` (heads-up it is also the small blind). Posters get
/// `SB`/`BB`, and the remaining players are labelled in seat order from the
/// big blind poster.
pub fn relabel_from_blinds(players: &mut [Player]) {
    let n = players.len();
    for p in players.iter_mut() {
        p.position = if p.is_button {
            Some(TablePosition::Button)
        } else if p.is_small_blind {
            Some(TablePosition::SmallBlind)
        } else if p.is_big_blind {
            Some(TablePosition::BigBlind)
        } else {
            None
        };
    }

    let Some(anchor) = players
        .iter()
        .position(|p| p.is_big_blind)
        .or_else(|| players.iter().position(|p| p.is_small_blind))
    else {
        return;
    };
    let rest: Vec<usize> = (1..n)
        .map(|offset| (anchor + offset) % n)
        .filter(|&i| players[i].position.is_none())
        .collect();
    for (i, label) in rest.iter().zip(middle_labels(rest.len())) {
        players[*i].position = Some(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::grammar;

    fn seated(seats: &[u8]) -> Vec<Player> {
        seats
            .iter()
            .map(|&seat| Player {
                name: format!("p{seat}"),
                seat,
                stack: 1500,
                is_hero: false,
                is_button: false,
                is_small_blind: false,
                is_big_blind: false,
                position: None,
                sitting_out: false,
            })
            .collect()
    }

    fn flags(players: &[Player]) -> Vec<(u8, bool, bool, bool)> {
        players
            .iter()
            .map(|p| (p.seat, p.is_button, p.is_small_blind, p.is_big_blind))
            .collect()
    }

    #[test]
    fn extracts_and_sorts_seats() {
        let lines = [
            "Table 'x' 9-max Seat #2 is the button",
            "Seat 5: Portos1941 (3,120 in chips)",
            "Seat 2: Vinao182 (1500 in chips, $0.50 bounty)",
            "Seat 7: mucareca10 (800 in chips) is sitting out",
            "*** HOLE CARDS ***",
            "Seat 9: late (100 in chips)",
        ];
        let out = extract_players(grammar(), &lines, Some(2));
        let seats: Vec<u8> = out.players.iter().map(|p| p.seat).collect();
        assert_eq!(seats, vec![2, 5, 7]);
        assert_eq!(out.players[1].stack, 3120);
        assert!(out.players[2].sitting_out);
        assert!(out.players[0].is_button);
        assert!(out.players[1].is_small_blind);
        assert!(out.players[2].is_big_blind);
    }

    #[test]
    fn duplicate_seat_keeps_first() {
        let lines = ["Seat 1: a (100 in chips)", "Seat 1: b (200 in chips)"];
        let out = extract_players(grammar(), &lines, None);
        assert_eq!(out.players.len(), 1);
        assert_eq!(out.players[0].name, "a");
        assert_eq!(
            out.diagnostics,
            vec![Diagnostic::DuplicateSeat { seat: 1, name: "b".into() }]
        );
    }

    #[test]
    fn walk_wraps_over_present_seats() {
        let mut players = seated(&[1, 3, 6, 8]);
        assign_positions(&mut players, 8);
        assert_eq!(
            flags(&players),
            vec![
                (1, false, true, false),
                (3, false, false, true),
                (6, false, false, false),
                (8, true, false, false),
            ]
        );
        assert_eq!(players[2].position, Some(TablePosition::UnderTheGun));
    }

    #[test]
    fn heads_up_button_is_small_blind() {
        let mut players = seated(&[2, 7]);
        assign_positions(&mut players, 7);
        assert_eq!(flags(&players), vec![(2, false, false, true), (7, true, true, false)]);
        assert_eq!(players[1].position, Some(TablePosition::Button));
        assert_eq!(players[0].position, Some(TablePosition::BigBlind));
    }

    #[test]
    fn dead_button_starts_after_empty_seat() {
        let mut players = seated(&[1, 2, 5, 9]);
        assign_positions(&mut players, 4);
        assert!(players.iter().all(|p| !p.is_button));
        assert!(players[2].is_small_blind);
        assert!(players[3].is_big_blind);

        let mut wrapped = seated(&[1, 2, 5]);
        assign_positions(&mut wrapped, 9);
        assert!(wrapped[0].is_small_blind);
        assert!(wrapped[1].is_big_blind);
    }

    #[test]
    fn full_ring_labels() {
        let mut players = seated(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assign_positions(&mut players, 1);
        let labels: Vec<&str> = players
            .iter()
            .map(|p| p.position.map(|l| l.label()).unwrap_or("-"))
            .collect();
        assert_eq!(
            labels,
            vec!["BTN", "SB", "BB", "UTG", "UTG+1", "UTG+2", "MP", "HJ", "CO"]
        );
    }

    #[test]
    fn six_max_labels() {
        let mut players = seated(&[1, 2, 3, 4, 5, 6]);
        assign_positions(&mut players, 4);
        let labels: Vec<&str> = players
            .iter()
            .map(|p| p.position.map(|l| l.label()).unwrap_or("-"))
            .collect();
        assert_eq!(labels, vec!["UTG", "HJ", "CO", "BTN", "SB", "BB"]);
    }

    #[test]
    fn lone_player_behind_dead_button_holds_no_blind() {
        let mut players = seated(&[3]);
        assign_positions(&mut players, 1);
        assert_eq!(flags(&players), vec![(3, false, false, false)]);
        assert_eq!(players[0].position, None);
    }

    #[test]
    fn posted_blinds_relabel_the_table() {
        let mut players = seated(&[1, 4, 6, 8]);
        assign_positions(&mut players, 1);
        assert_eq!(players[1].position, Some(TablePosition::SmallBlind));

        for p in players.iter_mut() {
            p.is_small_blind = p.seat == 6;
            p.is_big_blind = p.seat == 8;
        }
        relabel_from_blinds(&mut players);
        let labels: Vec<&str> = players
            .iter()
            .map(|p| p.position.map(|l| l.label()).unwrap_or("-"))
            .collect();
        assert_eq!(labels, vec!["BTN", "UTG", "SB", "BB"]);
    }

    #[test]
    fn relabel_keeps_heads_up_button() {
        let mut players = seated(&[2, 7]);
        assign_positions(&mut players, 7);
        relabel_from_blinds(&mut players);
        assert_eq!(players[1].position, Some(TablePosition::Button));
        assert!(players[1].is_small_blind);
        assert_eq!(players[0].position, Some(TablePosition::BigBlind));
    }
}
