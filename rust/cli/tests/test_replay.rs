use hhreplay_cli::run;
use std::io::Write;
use tempfile::NamedTempFile;

const SCENARIO: &str = include_str!("../../engine/tests/data/hand_257152017277.txt");
const SESSION: &str = include_str!("../../engine/tests/data/session.txt");

fn export(text: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(text.as_bytes()).unwrap();
    f
}

fn replay(text: &str, extra: &[&str]) -> (i32, String, String) {
    let f = export(text);
    let path = f.path().to_string_lossy().into_owned();
    let mut args = vec!["hhreplay", "replay", "--input", path.as_str()];
    args.extend_from_slice(extra);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn replay_steps_through_scenario_hand() {
    let (code, stdout, stderr) = replay(SCENARIO, &[]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines[0],
        "Hand #257152017277 (Tournament #3914216809, Level IV, Table '3914216809 1')"
    );
    assert!(lines.contains(&"Blinds: SB=40 BB=80 Ante=10"));
    assert!(lines.contains(&"*** PREFLOP ***"));
    assert!(lines.iter().any(|l| l.starts_with("Hero: phpro [Q")));
    assert!(lines.contains(&"  [10] Vinao182 raises 160 to 240  (pot 440)"));
    assert!(lines.contains(&"  [11] Portos1941 calls 240  (pot 680)"));
    assert!(lines.iter().any(|l| l.starts_with("*** FLOP *** [7")));
    assert!(lines.contains(&"  [0] Vinao182 checks  (pot 680)"));
    assert!(lines.contains(&"  [1] Portos1941 bets 240  (pot 920)"));
    assert!(lines.contains(&"  [2] Vinao182 raises 1025 to 1265  (pot 2185)"));
    assert!(lines.contains(&"  [3] Portos1941 calls 892  (pot 3077)"));
    assert!(lines.contains(&"  Uncalled bet (133) returned to Vinao182  (pot 2944)"));
    assert!(lines.contains(&"  [2] Vinao182 collects 2944  (pot 2944)"));
    assert!(lines.iter().any(|l| l.starts_with("Winner: Vinao182")));
    assert_eq!(lines.last(), Some(&"Total pot: 2944"));

    let flop = lines.iter().position(|l| l.starts_with("*** FLOP ***")).unwrap();
    let turn = lines.iter().position(|l| l.starts_with("*** TURN ***")).unwrap();
    let uncalled = lines.iter().position(|l| l.starts_with("  Uncalled bet")).unwrap();
    assert!(flop < uncalled && uncalled < turn);
}

#[test]
fn replay_single_hand_by_id() {
    let (code, stdout, _) = replay(SESSION, &["--hand", "257153001122"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("Hand #").count(), 1);
    assert!(stdout.starts_with("Hand #257153001122"));
}

#[test]
fn replay_unknown_hand_id_fails() {
    let (code, stdout, stderr) = replay(SESSION, &["--hand", "1"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("hand 1 not found"));
}

#[test]
fn replay_all_hands_in_session() {
    let (code, stdout, _) = replay(SESSION, &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("Hand #").count(), 4);
}
