//! Flat, serialisable projections of a [`HandReplay`] for consumers that do
//! not want the full model: replay UIs, storage and the analysis service.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{ActionKind, Blinds, HandReplay, Player, StreetName};
use crate::replay::PlaybackEvent;
use crate::seats::TablePosition;

/// Date format used for `date_played` in flat output.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    /// Seat number
    pub position: u8,
    pub stack: u64,
    pub is_hero: bool,
    pub is_button: bool,
    pub is_sb: bool,
    pub is_bb: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<TablePosition>,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        PlayerView {
            name: p.name.clone(),
            position: p.seat,
            stack: p.stack,
            is_hero: p.is_hero,
            is_button: p.is_button,
            is_sb: p.is_small_blind,
            is_bb: p.is_big_blind,
            label: p.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionView {
    pub player: String,
    pub action: ActionKind,
    pub amount: u64,
    pub total_bet: u64,
    pub timestamp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetView {
    pub name: StreetName,
    pub cards: Vec<String>,
    pub actions: Vec<ActionView>,
}

/// The flat replay record handed to playback consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub hand_id: String,
    pub tournament_id: Option<String>,
    pub table_name: Option<String>,
    pub level: Option<String>,
    pub date_played: Option<String>,
    pub blinds: Blinds,
    pub players: Vec<PlayerView>,
    pub hero_name: Option<String>,
    pub hero_cards: Vec<String>,
    pub streets: Vec<StreetView>,
    pub action_sequence: Vec<PlaybackEvent>,
    pub gaps_identified: Vec<String>,
}

impl HandView {
    /// `fallback` stands in for a missing header timestamp.
    pub fn from_replay(replay: &HandReplay, fallback: Option<NaiveDateTime>) -> Self {
        HandView {
            hand_id: replay.hand_id.clone(),
            tournament_id: replay.tournament_id.clone(),
            table_name: replay.table_name.clone(),
            level: replay.level.clone(),
            date_played: date_played(replay, fallback),
            blinds: replay.blinds,
            players: replay.players.iter().map(PlayerView::from).collect(),
            hero_name: replay.hero_name.clone(),
            hero_cards: replay.hero_cards.clone(),
            streets: replay
                .streets
                .iter()
                .map(|s| StreetView {
                    name: s.name,
                    cards: s.cards.clone(),
                    actions: s
                        .actions
                        .iter()
                        .map(|a| ActionView {
                            player: a.player.clone(),
                            action: a.kind,
                            amount: a.amount,
                            total_bet: a.total_bet,
                            timestamp: a.order,
                        })
                        .collect(),
                })
                .collect(),
            action_sequence: replay.action_sequence(),
            gaps_identified: replay.gaps.clone(),
        }
    }
}

fn date_played(replay: &HandReplay, fallback: Option<NaiveDateTime>) -> Option<String> {
    replay
        .timestamp
        .or(fallback)
        .map(|ts| ts.format(DATE_FORMAT).to_string())
}

/// The storage/search record for one hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandMetadata {
    pub hand_id: String,
    pub tournament_id: Option<String>,
    pub table_name: Option<String>,
    pub date_played: Option<String>,
    pub level: Option<String>,
    pub hero_name: Option<String>,
    pub hero_position: Option<TablePosition>,
    pub hero_cards: Option<String>,
    /// Kind of the hero's last action
    pub hero_action: Option<ActionKind>,
    pub pot_size: Option<u64>,
    pub board_cards: Option<String>,
    pub player_count: usize,
}

impl HandMetadata {
    pub fn from_replay(replay: &HandReplay, fallback: Option<NaiveDateTime>) -> Self {
        let board = replay.board();
        HandMetadata {
            hand_id: replay.hand_id.clone(),
            tournament_id: replay.tournament_id.clone(),
            table_name: replay.table_name.clone(),
            date_played: date_played(replay, fallback),
            level: replay.level.clone(),
            hero_name: replay.hero_name.clone(),
            hero_position: replay.hero().and_then(|h| h.position),
            hero_cards: (!replay.hero_cards.is_empty()).then(|| replay.hero_cards.join(" ")),
            hero_action: replay.hero_actions().last().map(|a| a.kind),
            pot_size: replay.pot_total,
            board_cards: (!board.is_empty()).then(|| board.join(" ")),
            player_count: replay.players.len(),
        }
    }
}

/// Context strings for the hand-analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub hero: String,
    pub board: String,
    pub actions: String,
}

impl AnalysisContext {
    pub fn from_replay(replay: &HandReplay) -> Self {
        let hero = match replay.hero() {
            Some(h) => {
                let label = h.position.map(|p| p.label()).unwrap_or("unknown position");
                let cards = if replay.hero_cards.is_empty() {
                    "unknown cards".to_string()
                } else {
                    replay.hero_cards.join(" ")
                };
                format!(
                    "Hero: {} ({label}, seat {}) holding {cards}, stack {}",
                    h.name, h.seat, h.stack
                )
            }
            None => "Hero: not identified".to_string(),
        };

        let board = {
            let streets: Vec<String> = replay
                .streets
                .iter()
                .filter(|s| !s.cards.is_empty())
                .map(|s| format!("{} [{}]", s.name, s.cards.join(" ")))
                .collect();
            if streets.is_empty() {
                "Board: none (hand ended preflop)".to_string()
            } else {
                format!("Board: {}", streets.join(", "))
            }
        };

        let actions = replay
            .streets
            .iter()
            .filter(|s| !s.actions.is_empty())
            .map(|s| {
                let line: Vec<String> = s.actions.iter().map(|a| a.to_string()).collect();
                format!("{}: {}", s.name.as_str().to_uppercase(), line.join("; "))
            })
            .collect::<Vec<_>>()
            .join("\n");

        AnalysisContext {
            hero,
            board,
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::HandParser;
    use chrono::NaiveDate;

    const HAND: &str = "\
PokerStars Hand #77: Tournament #8, Hold'em No Limit - Level III (20/40) - 2025/07/30 20:13:26 ET
Table '8 1' 9-max Seat #1 is the button
Seat 1: a (1000 in chips)
Seat 2: b (1000 in chips)
Seat 3: hero (1000 in chips)
a: posts the ante 5
b: posts the ante 5
hero: posts the ante 5
b: posts small blind 20
hero: posts big blind 40
*** HOLE CARDS ***
Dealt to hero [Kd Kh]
a: raises 40 to 80
b: folds
hero: calls 40
*** FLOP *** [2s 7h 9c]
hero: checks
a: bets 100
hero: folds
Uncalled bet (100) returned to a
a collected 195 from pot
*** SUMMARY ***
Total pot 195 | Rake 0
Board [2s 7h 9c]
Seat 1: a (button) collected (195)";

    #[test]
    fn flat_view_shape() {
        let r = HandParser::new().parse(HAND).unwrap();
        let v = HandView::from_replay(&r, None);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["hand_id"], "77");
        assert_eq!(json["blinds"]["ante"], 5);
        assert_eq!(json["players"][2]["is_hero"], true);
        assert_eq!(json["players"][2]["is_bb"], true);
        assert_eq!(json["players"][2]["position"], 3);
        assert_eq!(json["streets"][1]["name"], "flop");
        assert_eq!(json["streets"][1]["actions"][1]["action"], "bet");
        assert_eq!(json["date_played"], "2025-07-30 20:13:26");
        assert_eq!(json["gaps_identified"][0], "Review: call of 40 on the preflop");
    }

    #[test]
    fn fallback_date_only_when_missing() {
        let r = HandParser::new().parse(HAND).unwrap();
        let later = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            HandView::from_replay(&r, Some(later)).date_played.as_deref(),
            Some("2025-07-30 20:13:26")
        );
        let undated = HAND.replace(" - 2025/07/30 20:13:26 ET", "");
        let r = HandParser::new().parse(&undated).unwrap();
        assert!(r.timestamp.is_none());
        assert_eq!(
            HandMetadata::from_replay(&r, Some(later)).date_played.as_deref(),
            Some("2030-01-01 00:00:00")
        );
    }

    #[test]
    fn metadata_record() {
        let r = HandParser::new().parse(HAND).unwrap();
        let m = HandMetadata::from_replay(&r, None);
        assert_eq!(m.hero_position, Some(TablePosition::BigBlind));
        assert_eq!(m.hero_cards.as_deref(), Some("Kd Kh"));
        assert_eq!(m.hero_action, Some(ActionKind::Fold));
        assert_eq!(m.pot_size, Some(195));
        assert_eq!(m.board_cards.as_deref(), Some("2s 7h 9c"));
        assert_eq!(m.player_count, 3);
    }

    #[test]
    fn analysis_context_strings() {
        let r = HandParser::new().parse(HAND).unwrap();
        let ctx = AnalysisContext::from_replay(&r);
        assert_eq!(ctx.hero, "Hero: hero (BB, seat 3) holding Kd Kh, stack 1000");
        assert_eq!(ctx.board, "Board: flop [2s 7h 9c]");
        assert!(ctx.actions.starts_with("PREFLOP: a: posts the ante 5; "));
        assert!(ctx.actions.contains("FLOP: hero: checks; a: bets 100; hero: folds"));
    }
}
