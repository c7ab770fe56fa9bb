//! Gaps command: review hints and analysis context for each hand.

use hhreplay_engine::HandReplay;
use hhreplay_engine::view::AnalysisContext;
use std::io::Write;

use super::load_hands;
use crate::config::Config;
use crate::error::CliError;

pub fn handle_gaps_command(
    input: String,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let report = load_hands(&input, config, err)?;
    for (i, replay) in report.replays.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_gaps(replay, out)?;
    }
    Ok(())
}

fn write_gaps(replay: &HandReplay, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Hand #{}", replay.hand_id)?;
    if replay.gaps.is_empty() {
        writeln!(out, "  No gaps identified")?;
    }
    for gap in &replay.gaps {
        writeln!(out, "  - {}", gap)?;
    }
    let ctx = AnalysisContext::from_replay(replay);
    writeln!(out, "  {}", ctx.hero)?;
    writeln!(out, "  {}", ctx.board)?;
    for line in ctx.actions.lines() {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hhreplay_engine::HandParser;

    #[test]
    fn lists_gaps_then_context() {
        let text = "PokerStars Hand #31: Tournament #2, Hold'em No Limit - Level I (10/20) - 2025/07/30 20:13:26 ET\nTable '2 1' 9-max Seat #1 is the button\nSeat 1: a (1500 in chips)\nSeat 2: b (1500 in chips)\na: posts small blind 10\nb: posts big blind 20\n*** HOLE CARDS ***\nDealt to a [Ac Kc]\na: folds\nUncalled bet (10) returned to b\nb collected 20 from pot";
        let r = HandParser::new().parse(text).unwrap();
        let mut out = Vec::new();
        write_gaps(&r, &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "Hand #31");
        assert_eq!(lines[1], "  - Possible gap: folded premium cards (Ac Kc) preflop");
        assert!(lines[2].starts_with("  Hero: a (BTN"));
        assert_eq!(lines[3], "  Board: none (hand ended preflop)");
        assert!(lines[4].starts_with("  PREFLOP: a: posts small blind 10"));
    }
}
