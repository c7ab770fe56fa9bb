//! Hero-centred review hints.
//!
//! These are prompts for a human or an external analyser, not a
//! classification of mistakes.

use crate::cards::{Card, Rank};
use crate::model::{ActionKind, Street, StreetName};

fn is_premium(card: &str) -> bool {
    match Card::parse(card) {
        Some(c) => matches!(c.rank, Rank::Ace | Rank::King),
        None => card.starts_with(['A', 'K']),
    }
}

/// Scans the hero's actions. Without a hero there is nothing to report.
pub fn identify_gaps(hero: Option<&str>, hero_cards: &[String], streets: &[Street]) -> Vec<String> {
    let Some(hero) = hero else {
        return Vec::new();
    };
    let mut gaps = Vec::new();
    for action in streets
        .iter()
        .flat_map(|s| s.actions.iter())
        .filter(|a| a.player == hero)
    {
        match action.kind {
            ActionKind::Fold
                if action.street == StreetName::Preflop
                    && hero_cards.len() == 2
                    && hero_cards.iter().any(|c| is_premium(c)) =>
            {
                gaps.push(format!(
                    "Possible gap: folded premium cards ({}) preflop",
                    hero_cards.join(" ")
                ));
            }
            ActionKind::Call if action.amount > 0 => {
                gaps.push(format!(
                    "Review: call of {} on the {}",
                    action.amount, action.street
                ));
            }
            _ => {}
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;

    fn street(name: StreetName, acts: &[(&str, ActionKind, u64)]) -> Street {
        Street {
            name,
            cards: vec![],
            actions: acts
                .iter()
                .enumerate()
                .map(|(i, (p, kind, amount))| Action {
                    player: p.to_string(),
                    kind: *kind,
                    amount: *amount,
                    total_bet: *amount,
                    street: name,
                    order: i as u32,
                    cards: None,
                    is_all_in: false,
                })
                .collect(),
        }
    }

    fn cards(s: &str) -> Vec<String> {
        s.split(' ').map(String::from).collect()
    }

    #[test]
    fn premium_fold_is_flagged() {
        let streets = [street(StreetName::Preflop, &[("hero", ActionKind::Fold, 0)])];
        assert_eq!(
            identify_gaps(Some("hero"), &cards("Kh 7c"), &streets),
            vec!["Possible gap: folded premium cards (Kh 7c) preflop"]
        );
        assert!(identify_gaps(Some("hero"), &cards("Qh 7c"), &streets).is_empty());
    }

    #[test]
    fn postflop_fold_is_not_flagged() {
        let streets = [street(StreetName::Flop, &[("hero", ActionKind::Fold, 0)])];
        assert!(identify_gaps(Some("hero"), &cards("Ah Ac"), &streets).is_empty());
    }

    #[test]
    fn every_paid_call_is_flagged() {
        let streets = [
            street(StreetName::Preflop, &[("hero", ActionKind::Call, 80), ("villain", ActionKind::Call, 80)]),
            street(StreetName::River, &[("hero", ActionKind::Call, 0), ("hero", ActionKind::Call, 892)]),
        ];
        assert_eq!(
            identify_gaps(Some("hero"), &cards("2c 7d"), &streets),
            vec!["Review: call of 80 on the preflop", "Review: call of 892 on the river"]
        );
    }

    #[test]
    fn no_hero_no_hints() {
        let streets = [street(StreetName::Preflop, &[("x", ActionKind::Call, 80)])];
        assert!(identify_gaps(None, &[], &streets).is_empty());
    }
}
