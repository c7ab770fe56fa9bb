use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Parses the rank token used in hand histories (`2`..`9`, `T`/`10`, `J`, `Q`, `K`, `A`).
    pub fn from_token(token: &str) -> Option<Rank> {
        match token.to_ascii_uppercase().as_str() {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "T" | "10" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// Represents a single playing card with a suit and rank.
/// Hand histories write cards as two-character tokens such as `As` or `Td`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    /// Parses a card token (`As`, `Td`, `10h`). Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Card> {
        let token = token.trim();
        let suit_char = token.chars().last()?;
        let rank_part = &token[..token.len() - suit_char.len_utf8()];
        Some(Card {
            suit: Suit::from_char(suit_char)?,
            rank: Rank::from_token(rank_part)?,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.as_char(), self.suit.as_char())
    }
}

/// Splits the inside of a bracket group (`7s 3d 2d`) into card tokens.
///
/// Tokens are kept verbatim so the replay reproduces the source text; use
/// [`Card::parse`] when typed cards are needed.
pub fn split_cards(group: &str) -> Vec<String> {
    group
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

/// Returns every `[...]` group on a line, in order of appearance.
pub fn bracket_groups(line: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close) => {
                groups.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_tokens() {
        let c = Card::parse("As").unwrap();
        assert_eq!(c.rank, Rank::Ace);
        assert_eq!(c.suit, Suit::Spades);
        assert_eq!(Card::parse("Td").unwrap().rank, Rank::Ten);
        assert_eq!(Card::parse("10h").unwrap().rank, Rank::Ten);
        assert_eq!(Card::parse("Kc").unwrap().to_string(), "Kc");
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(Card::parse("").is_none());
        assert!(Card::parse("Zz").is_none());
        assert!(Card::parse("A").is_none());
        assert!(Card::parse("1s").is_none());
    }

    #[test]
    fn bracket_groups_in_order() {
        let line = "*** TURN *** [7s 3d 2d] [Jc]";
        assert_eq!(bracket_groups(line), vec!["7s 3d 2d", "Jc"]);
        assert!(bracket_groups("no cards here").is_empty());
        assert_eq!(bracket_groups("broken [As Kd"), Vec::<&str>::new());
    }

    #[test]
    fn split_cards_drops_extra_spaces() {
        assert_eq!(split_cards("  As   Kh "), vec!["As", "Kh"]);
        assert!(split_cards("").is_empty());
    }
}
