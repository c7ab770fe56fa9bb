//! Card, seat and action formatters for terminal playback.
//!
//! Pure functions over engine types. Cards use Unicode suit symbols where the
//! terminal supports them and the hand-history letters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use hhreplay_cli::formatters::{format_card, format_cards};
//!
//! assert!(format_card("As") == "A♠" || format_card("As") == "As");
//! assert!(format_cards(&["7s".to_string(), "3d".to_string()]).starts_with("[7"));
//! ```

use hhreplay_engine::cards::{Card, Suit};
use hhreplay_engine::model::{ActionKind, StreetName};
use hhreplay_engine::view::PlayerView;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.as_char().to_string()
    }
}

/// Format a card token from the hand history. Tokens that are not cards
/// are printed as they are.
pub fn format_card(token: &str) -> String {
    match Card::parse(token) {
        Some(card) => format!("{}{}", card.rank.as_char(), format_suit(card.suit)),
        None => token.to_string(),
    }
}

/// Format a group of cards as `[A♠ K♦]`.
pub fn format_cards(cards: &[String]) -> String {
    let inner: Vec<String> = cards.iter().map(|c| format_card(c)).collect();
    format!("[{}]", inner.join(" "))
}

/// Street marker line, e.g. `*** FLOP *** [7♠ 3♦ 2♦]`.
pub fn format_street(street: StreetName, cards: &[String]) -> String {
    let name = street.as_str().to_uppercase();
    if cards.is_empty() {
        format!("*** {} ***", name)
    } else {
        format!("*** {} *** {}", name, format_cards(cards))
    }
}

/// One seat line of the setup block: seat, name, stack and role tags.
pub fn format_player(p: &PlayerView) -> String {
    let mut line = format!("Seat {}: {} ({})", p.position, p.name, p.stack);
    if let Some(label) = p.label {
        line.push_str(&format!(" {}", label));
    }
    let mut tags = Vec::new();
    if p.is_button {
        tags.push("button");
    }
    if p.is_sb {
        tags.push("small blind");
    }
    if p.is_bb {
        tags.push("big blind");
    }
    if p.is_hero {
        tags.push("hero");
    }
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

/// Verb phrase for an action, e.g. `raises 1025 to 1265`.
pub fn format_action(kind: ActionKind, amount: u64, total_bet: u64) -> String {
    match kind {
        ActionKind::Ante => format!("posts the ante {}", amount),
        ActionKind::SmallBlind => format!("posts small blind {}", amount),
        ActionKind::BigBlind => format!("posts big blind {}", amount),
        ActionKind::Fold => "folds".to_string(),
        ActionKind::Check => "checks".to_string(),
        ActionKind::Call => format!("calls {}", amount),
        ActionKind::Bet => format!("bets {}", amount),
        ActionKind::Raise => format!("raises {} to {}", amount, total_bet),
        ActionKind::AllIn => format!("is all-in for {}", amount),
        ActionKind::Shows => "shows".to_string(),
        ActionKind::Mucks => "mucks".to_string(),
        ActionKind::Collected => format!("collects {}", amount),
    }
}
