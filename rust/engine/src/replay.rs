//! Assembling a [`HandReplay`] from one hand's text.

use serde::{Deserialize, Serialize};

use crate::errors::RejectReason;
use crate::gaps::identify_gaps;
use crate::grammar::{clean_line, grammar};
use crate::header::{extract_header, extract_table};
use crate::hero::locate_hero;
use crate::model::{
    Action, ActionKind, BlindSource, Blinds, Diagnostic, HandReplay, Player, StreetName,
};
use crate::seats::{extract_players, relabel_from_blinds};
use crate::street::parse_streets;
use crate::view::PlayerView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject hands that have no seated hero.
    pub require_hero: bool,
}

/// Parses single hands. Holds no per-hand state, so one parser can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandParser {
    options: ParseOptions,
}

impl HandParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        HandParser { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses one hand block.
    ///
    /// Only a missing header or an empty seat list (or a hero-less hand when
    /// `require_hero` is set) rejects the hand. Everything else that cannot be
    /// read is left empty and noted in [`HandReplay::diagnostics`].
    pub fn parse(&self, text: &str) -> Result<HandReplay, RejectReason> {
        let g = grammar();
        let lines: Vec<&str> = text.lines().map(clean_line).collect();

        let (header_idx, header) =
            extract_header(g, &lines).ok_or(RejectReason::MissingHeader)?;
        let _span = tracing::debug_span!("hand", hand_id = %header.hand_id).entered();

        let table = extract_table(g, &lines);
        let seats = extract_players(g, &lines, table.as_ref().map(|t| t.button_seat));
        if seats.players.is_empty() {
            return Err(RejectReason::NoSeats);
        }
        let mut players = seats.players;
        let mut diagnostics = Vec::new();

        if header.tournament_id.is_none() {
            diagnostics.push(Diagnostic::field_missing("tournament_id"));
        }
        if header.blinds.is_none() {
            diagnostics.push(Diagnostic::field_missing("blinds"));
        }
        if header.timestamp.is_none() {
            diagnostics.push(Diagnostic::field_missing("timestamp"));
        }
        if table.is_none() {
            diagnostics.push(Diagnostic::field_missing("table"));
        }
        diagnostics.extend(seats.diagnostics);

        let hero = match locate_hero(g, &lines) {
            Some(h) if players.iter().any(|p| p.name == h.name) => Some(h),
            Some(h) => {
                diagnostics.push(Diagnostic::UnseatedHero { name: h.name });
                None
            }
            None => {
                diagnostics.push(Diagnostic::field_missing("hero"));
                None
            }
        };
        if hero.is_none() && self.options.require_hero {
            return Err(RejectReason::MissingHero);
        }
        if let Some(h) = &hero {
            for p in players.iter_mut() {
                p.is_hero = p.name == h.name;
            }
        }

        let seated: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        let body = lines[header_idx + 1..].iter().copied();
        let output = parse_streets(seated, body, header_idx + 2);
        diagnostics.extend(output.diagnostics);

        let preflop = output
            .streets
            .iter()
            .find(|s| s.name == StreetName::Preflop)
            .map(|s| s.actions.as_slice())
            .unwrap_or(&[]);
        let blind_source = reconcile_blinds(&mut players, preflop, table.is_some());

        let mut blinds = header.blinds.unwrap_or_default();
        blinds.ante = output
            .streets
            .iter()
            .flat_map(|s| s.actions.iter())
            .filter(|a| a.kind == ActionKind::Ante)
            .map(|a| a.amount)
            .max()
            .unwrap_or(0);

        let collected: Vec<&Action> = output
            .streets
            .iter()
            .flat_map(|s| s.actions.iter())
            .filter(|a| a.kind == ActionKind::Collected)
            .collect();
        let winner = output
            .summary
            .winner()
            .map(|o| o.player.clone())
            .or_else(|| collected.first().map(|a| a.player.clone()));
        let pot_total = output.summary.total_pot.or_else(|| {
            (!collected.is_empty())
                .then(|| collected.iter().fold(0u64, |pot, a| pot.saturating_add(a.amount)))
        });
        let winning_hand = output.summary.winning_hand().map(str::to_string);

        let (hero_name, hero_cards) = match hero {
            Some(h) => (Some(h.name), h.cards),
            None => (None, Vec::new()),
        };
        let gaps = identify_gaps(hero_name.as_deref(), &hero_cards, &output.streets);

        Ok(HandReplay {
            hand_id: header.hand_id,
            tournament_id: header.tournament_id,
            table_name: table.as_ref().map(|t| t.name.clone()),
            game: header.game,
            level: header.level,
            timestamp: header.timestamp,
            timezone: header.timezone,
            max_seats: table.as_ref().and_then(|t| t.max_seats),
            button_seat: table.as_ref().map(|t| t.button_seat),
            blinds,
            blind_source,
            players,
            hero_name,
            hero_cards,
            streets: output.streets,
            uncalled: output.uncalled,
            winner,
            winning_hand,
            pot_total,
            summary: output.summary,
            gaps,
            diagnostics,
        })
    }
}

/// Parses one hand with default options, discarding the reject reason.
pub fn parse_hand(text: &str) -> Option<HandReplay> {
    HandParser::new().parse(text).ok()
}

/// Literal blind posts win over positional inference. When any post exists,
/// the flags are rebuilt from the posts alone.
fn reconcile_blinds(players: &mut [Player], preflop: &[Action], has_button: bool) -> BlindSource {
    let posted = |kind: ActionKind| -> Vec<&str> {
        preflop
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.player.as_str())
            .collect()
    };
    let small = posted(ActionKind::SmallBlind);
    let big = posted(ActionKind::BigBlind);
    if small.is_empty() && big.is_empty() {
        return if has_button {
            BlindSource::Positional
        } else {
            BlindSource::Unknown
        };
    }
    for p in players.iter_mut() {
        p.is_small_blind = small.contains(&p.name.as_str());
        p.is_big_blind = big.contains(&p.name.as_str());
    }
    relabel_from_blinds(players);
    BlindSource::Posted
}

/// One step of a replay, in playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    Setup {
        players: Vec<PlayerView>,
        blinds: Blinds,
        hero_cards: Vec<String>,
    },
    CommunityCards {
        street: StreetName,
        cards: Vec<String>,
    },
    Action {
        street: StreetName,
        player: String,
        action: ActionKind,
        amount: u64,
        total_bet: u64,
        /// Order within the street
        timestamp: u32,
    },
}

impl HandReplay {
    /// Flattens the replay into one ordered event list: a setup event, then
    /// per street its community cards (when any) followed by its actions.
    pub fn action_sequence(&self) -> Vec<PlaybackEvent> {
        let mut events = vec![PlaybackEvent::Setup {
            players: self.players.iter().map(PlayerView::from).collect(),
            blinds: self.blinds,
            hero_cards: self.hero_cards.clone(),
        }];
        for street in &self.streets {
            if !street.cards.is_empty() {
                events.push(PlaybackEvent::CommunityCards {
                    street: street.name,
                    cards: street.cards.clone(),
                });
            }
            events.extend(street.actions.iter().map(|a| PlaybackEvent::Action {
                street: a.street,
                player: a.player.clone(),
                action: a.kind,
                amount: a.amount,
                total_bet: a.total_bet,
                timestamp: a.order,
            }));
        }
        events
    }
}
