use crate::cards::split_cards;
use crate::grammar::Grammar;

/// The tracked player and their hole cards, from the first `Dealt to` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroInfo {
    pub name: String,
    pub cards: Vec<String>,
}

pub fn locate_hero(g: &Grammar, lines: &[&str]) -> Option<HeroInfo> {
    lines.iter().find_map(|line| {
        let caps = g.dealt_to.captures(line)?;
        Some(HeroInfo {
            name: caps.name("name")?.as_str().to_string(),
            cards: split_cards(caps.name("cards")?.as_str()),
        })
    })
}
