use hhreplay_engine::model::{ActionKind, BlindSource, StreetName, UncalledBet};
use hhreplay_engine::replay::{HandParser, PlaybackEvent};
use hhreplay_engine::seats::TablePosition;

const HAND: &str = include_str!("data/hand_257152017277.txt");

#[test]
fn scenario_hand_id_and_flop_actions() {
    let r = HandParser::new().parse(HAND).expect("scenario parses");
    assert_eq!(r.hand_id, "257152017277");
    assert_eq!(r.tournament_id.as_deref(), Some("3914216809"));
    assert_eq!(r.table_name.as_deref(), Some("3914216809 1"));
    assert_eq!(r.level.as_deref(), Some("IV"));

    let flop = r.street(StreetName::Flop).expect("flop street");
    assert_eq!(flop.cards, vec!["7s", "3d", "2d"]);
    let kinds: Vec<ActionKind> = flop.actions.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![ActionKind::Check, ActionKind::Bet, ActionKind::Raise, ActionKind::Call]
    );
    let amounts: Vec<(u64, u64)> = flop.actions.iter().map(|a| (a.amount, a.total_bet)).collect();
    assert_eq!(amounts, vec![(0, 0), (240, 240), (1025, 1265), (892, 1132)]);
    assert!(flop.actions[2].is_all_in);
    assert!(flop.actions[3].is_all_in);
}

#[test]
fn scenario_collected_and_winner() {
    let r = HandParser::new().parse(HAND).unwrap();
    let collected: Vec<_> = r
        .actions()
        .filter(|a| a.kind == ActionKind::Collected)
        .collect();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].player, "Vinao182");
    assert_eq!(collected[0].amount, 2944);
    assert_eq!(collected[0].street, StreetName::Showdown);

    assert_eq!(r.winner.as_deref(), Some("Vinao182"));
    assert_eq!(r.winning_hand.as_deref(), Some("a full house, Eights full of Sevens"));
    assert_eq!(r.pot_total, Some(2944));
    assert_eq!(r.summary.rake, Some(0));
    assert_eq!(
        r.uncalled,
        vec![UncalledBet { player: "Vinao182".into(), amount: 133, street: StreetName::Flop }]
    );
}

#[test]
fn scenario_preflop_and_board() {
    let r = HandParser::new().parse(HAND).unwrap();
    let names: Vec<StreetName> = r.streets.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            StreetName::Preflop,
            StreetName::Flop,
            StreetName::Turn,
            StreetName::River,
            StreetName::Showdown,
            StreetName::Summary
        ]
    );
    let preflop = r.street(StreetName::Preflop).unwrap();
    assert_eq!(preflop.actions.len(), 18);
    let raise = preflop
        .actions
        .iter()
        .find(|a| a.kind == ActionKind::Raise)
        .unwrap();
    assert_eq!((raise.player.as_str(), raise.amount, raise.total_bet), ("Vinao182", 160, 240));
    let call = preflop.actions.iter().find(|a| a.kind == ActionKind::Call).unwrap();
    assert_eq!((call.player.as_str(), call.total_bet), ("Portos1941", 240));

    assert_eq!(r.street(StreetName::Turn).unwrap().cards, vec!["7d"]);
    assert_eq!(r.street(StreetName::River).unwrap().cards, vec!["8c"]);
    assert_eq!(r.board(), vec!["7s", "3d", "2d", "7d", "8c"]);
    assert_eq!((r.blinds.small, r.blinds.big, r.blinds.ante), (40, 80, 10));
}

#[test]
fn scenario_seats_and_hero() {
    let r = HandParser::new().parse(HAND).unwrap();
    assert_eq!(r.players.len(), 8);
    assert_eq!(r.blind_source, BlindSource::Posted);
    assert_eq!(r.hero_name.as_deref(), Some("phpro"));
    assert_eq!(r.hero_cards, vec!["Qh", "9s"]);

    let hero = r.hero().unwrap();
    assert!(hero.is_big_blind);
    assert_eq!(hero.position, Some(TablePosition::BigBlind));
    assert!(r.player("TaksMann").unwrap().is_button);
    assert!(r.player("mucareca10").unwrap().is_small_blind);
    assert_eq!(r.player("Biduu 1985").unwrap().stack, 2430);

    let labels: Vec<&str> = r
        .players
        .iter()
        .map(|p| p.position.map(|l| l.label()).unwrap_or("-"))
        .collect();
    assert_eq!(labels, vec!["BTN", "SB", "BB", "UTG", "UTG+1", "MP", "HJ", "CO"]);
    assert!(r.gaps.is_empty());
}

#[test]
fn scenario_action_sequence() {
    let r = HandParser::new().parse(HAND).unwrap();
    let events = r.action_sequence();
    assert_eq!(events.len(), 29);
    match &events[0] {
        PlaybackEvent::Setup { players, blinds, hero_cards } => {
            assert_eq!(players.len(), 8);
            assert_eq!(blinds.big, 80);
            assert_eq!(hero_cards, &vec!["Qh".to_string(), "9s".to_string()]);
        }
        other => panic!("first event should be setup, got {other:?}"),
    }
    assert_eq!(
        events[19],
        PlaybackEvent::CommunityCards {
            street: StreetName::Flop,
            cards: vec!["7s".into(), "3d".into(), "2d".into()]
        }
    );
    let json = serde_json::to_value(&events).unwrap();
    assert_eq!(json[0]["type"], "setup");
    assert_eq!(json[19]["type"], "community_cards");
    assert_eq!(json[20]["type"], "action");
    assert_eq!(json[20]["action"], "check");
    assert_eq!(json[20]["timestamp"], 0);
}

#[test]
fn scenario_has_no_unrecognized_lines() {
    let r = HandParser::new().parse(HAND).unwrap();
    let unknown: Vec<_> = r.unrecognized_lines().collect();
    assert!(unknown.is_empty(), "unexpected skipped lines: {unknown:?}");
}
