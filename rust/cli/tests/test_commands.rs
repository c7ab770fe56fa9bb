use hhreplay_cli::run;
use std::io::Write;
use tempfile::NamedTempFile;

const SESSION: &str = include_str!("../../engine/tests/data/session.txt");
const PORTUGUESE: &str = include_str!("../../engine/tests/data/portuguese.txt");

fn export(text: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(text.as_bytes()).unwrap();
    f
}

fn run_on(command: &str, text: &str) -> (i32, String, String) {
    let f = export(text);
    let path = f.path().to_string_lossy().into_owned();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        ["hhreplay", command, "--input", path.as_str()],
        &mut out,
        &mut err,
    );
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn verify_accepts_known_good_session() {
    let (code, stdout, stderr) = run_on("verify", SESSION);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout.trim(), "Verify: OK (hands=4)");
}

#[test]
fn verify_flags_unrecognized_lines() {
    let text = SESSION.replacen(
        "*** HOLE CARDS ***",
        "*** HOLE CARDS ***\nthe dealer spilled a drink",
        1,
    );
    let (code, stdout, stderr) = run_on("verify", &text);
    assert_eq!(code, 2);
    assert_eq!(stdout.trim(), "Verify: FAIL (hands=4)");
    assert!(stderr.contains("Hand 257152017277: unrecognized line"));
    assert!(stderr.contains("the dealer spilled a drink"));
    assert!(stderr.contains("Summary: 1 error(s) in 4 hands (1 invalid hands)"));
}

#[test]
fn stats_summarizes_session() {
    let (code, stdout, _) = run_on("stats", SESSION);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["hands"], 4);
    assert_eq!(v["skipped"], 0);
    assert_eq!(v["unrecognized_lines"], 0);
    assert_eq!(v["hands_with_hero"], 4);
    assert!(v["hero_actions"]["fold"].as_u64().unwrap() >= 1);
    assert!(v["hero_actions"]["ante"].as_u64().unwrap() >= 1);
    assert!(v["gaps"].as_u64().unwrap() >= 1);
}

#[test]
fn stats_without_hands_fails() {
    let (code, stdout, stderr) = run_on("stats", "nothing to see in this file at all, really");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("no valid hands found (0 skipped)"));
}

#[test]
fn validate_reports_language() {
    let (code, stdout, _) = run_on("validate", SESSION);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["language"], "english");
    assert_eq!(v["is_valid"], true);

    let (code, stdout, stderr) = run_on("validate", PORTUGUESE);
    assert_eq!(code, 2);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["language"], "portuguese");
    assert!(stderr.starts_with("Error: "));
}

#[test]
fn gaps_prints_hints_and_context() {
    let (code, stdout, _) = run_on("gaps", SESSION);
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("Hand #").count(), 4);
    assert!(stdout.contains("  Hero: phpro (BB, seat 4) holding Qh 9s, stack 1495"));
    assert!(stdout.contains("  Board: flop [7s 3d 2d], turn [7d], river [8c]"));
    assert!(stdout.contains("Review: call of "));
}
