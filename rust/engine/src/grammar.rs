//! The PokerStars-English line grammar.
//!
//! Every pattern the engine matches lives in one [`Grammar`] value that is
//! compiled on first use and then shared read-only by all parses, from any
//! thread. Live-play actions are an explicit rule table: one [`ActionRule`]
//! per [`ActionKind`], tried in order, first match wins.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::model::ActionKind;

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::build);

/// Returns the process-wide grammar.
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}

/// One live-play rule. The pattern is matched against the text after `NAME: `
/// for actor rules, or against the whole line for line rules.
#[derive(Debug)]
pub struct ActionRule {
    pub kind: ActionKind,
    pub scope: RuleScope,
    pattern: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// `NAME: <verb> ...`
    Actor,
    /// The whole line carries the player name itself.
    Line,
}

/// A live-play line decoded by an [`ActionRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAction {
    pub player: String,
    pub kind: ActionKind,
    pub amount: u64,
    /// Second amount of `raises X to Y`.
    pub raise_to: Option<u64>,
    pub cards: Option<String>,
    pub is_all_in: bool,
}

#[derive(Debug)]
pub struct Grammar {
    pub(crate) header: Regex,
    pub(crate) header_blinds: Regex,
    pub(crate) timestamp: Regex,
    pub(crate) table: Regex,
    pub(crate) seat: Regex,
    pub(crate) dealt_to: Regex,
    pub(crate) marker: Regex,
    pub(crate) informational: Regex,
    pub(crate) total_pot: Regex,
    pub(crate) board: Regex,
    pub(crate) summary_seat: Regex,
    pub(crate) summary_outcome: Regex,
    pub(crate) summary_roles: Regex,
    pub(crate) uncalled: Regex,
    rules: Vec<ActionRule>,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

const AMOUNT: &str = r"\$?(?P<amount>[\d,]+)";
const ALL_IN: &str = r"(?P<allin> and is all-in)?";

impl Grammar {
    fn build() -> Grammar {
        let rules = vec![
            actor(ActionKind::Ante, &format!(r"^posts (?:the )?ante {AMOUNT}{ALL_IN}")),
            actor(ActionKind::SmallBlind, &format!(r"^posts small blind {AMOUNT}{ALL_IN}")),
            actor(ActionKind::BigBlind, &format!(r"^posts big blind {AMOUNT}{ALL_IN}")),
            actor(ActionKind::Fold, r"^folds(?: \[(?P<cards>[^\]]*)\])?\s*$"),
            actor(ActionKind::Check, r"^checks\s*$"),
            actor(ActionKind::Call, &format!(r"^calls {AMOUNT}{ALL_IN}\s*$")),
            actor(ActionKind::Bet, &format!(r"^bets {AMOUNT}{ALL_IN}\s*$")),
            actor(
                ActionKind::Raise,
                &format!(r"^raises {AMOUNT} to \$?(?P<to>[\d,]+){ALL_IN}\s*$"),
            ),
            actor(ActionKind::AllIn, r"^(?:is |goes )?all-in(?: \$?(?P<amount>[\d,]+))?\s*$"),
            actor(ActionKind::Shows, r"^shows \[(?P<cards>[^\]]*)\]"),
            actor(
                ActionKind::Mucks,
                r"^(?:mucks hand(?: \[(?P<cards>[^\]]*)\])?|doesn't show hand)",
            ),
            line(
                ActionKind::Collected,
                r"^(?P<player>.+?) collected \$?(?P<amount>[\d,]+) from (?:the )?(?:main |side )?pot",
            ),
        ];

        Grammar {
            header: re(concat!(
                r"^PokerStars (?:Zoom |Home Game )?Hand #(?P<id>\d+):\s+",
                r"(?:Tournament #(?P<tid>\d+),\s+)?",
                r"(?P<game>.+?)\s+(?:-\s+)?(?:Level (?P<level>[IVXLCDM]+)\s+)?",
                r"\((?P<blinds>[^)]*)\)",
                r"(?:\s+-\s+(?P<date>.*))?$",
            )),
            header_blinds: re(r"^\s*\$?(?P<sb>[\d,.]+)/\$?(?P<bb>[\d,.]+)"),
            timestamp: re(
                r"(?P<ts>\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{2}:\d{2})(?:\s+(?P<tz>[A-Z]{2,5}))?",
            ),
            table: re(
                r"^Table '(?P<name>[^']+)'(?: (?P<max>\d+)-max)?(?: \(Play Money\))? Seat #(?P<button>\d+) is the button",
            ),
            seat: re(
                r"^Seat (?P<seat>\d+): (?P<name>.+?) \(\$?(?P<stack>[\d,]+) in chips(?:, \$?[\d,.]+ bounty)?\)(?P<out> is sitting out)?",
            ),
            dealt_to: re(r"^Dealt to (?P<name>.+?) \[(?P<cards>[^\]]+)\]"),
            marker: re(
                r"^\*\*\* (?P<marker>HOLE CARDS|FLOP|TURN|RIVER|SHOW ?DOWN|SUMMARY) \*\*\*",
            ),
            informational: re(concat!(
                r"^(?:Dealt to |PokerStars |Table '|Seat \d+: .+ in chips)",
                r"|(?:: | )(?:sits out|is sitting out)\s*$",
                r"| (?:has timed out|is disconnected|is connected|has returned|re-buys|joins the table|leaves the table)",
                r"| said, ",
                r"| (?:finished the tournament|wins the tournament|was removed from the table)",
                r"| will be allowed to play after the button",
            )),
            total_pot: re(
                r"^Total pot \$?(?P<pot>[\d,]+).*?(?:\| Rake \$?(?P<rake>[\d,]+))?\s*$",
            ),
            board: re(r"^Board \[(?P<cards>[^\]]*)\]"),
            summary_seat: re(r"^Seat (?P<seat>\d+): (?P<rest>.+)$"),
            summary_outcome: re(concat!(
                r" (?:showed \[(?P<shown>[^\]]*)\] and (?:won \(\$?(?P<won>[\d,]+)\)|lost)(?: with (?P<desc>.+))?",
                r"|collected \(\$?(?P<collected>[\d,]+)\)",
                r"|mucked(?: \[(?P<mucked>[^\]]*)\])?",
                r"|folded (?P<folded>.+))\s*$",
            )),
            summary_roles: re(r"\s*\((?:button|small blind|big blind)\)\s*$"),
            uncalled: re(r"^Uncalled bet \(\$?(?P<amount>[\d,]+)\) returned to (?P<player>.+?)\s*$"),
            rules,
        }
    }

    /// The live-play rules in match order.
    pub fn rules(&self) -> &[ActionRule] {
        &self.rules
    }

    /// Decodes a live-play line. `seated` is used to resolve the actor of
    /// `NAME: verb` lines so that names containing `: ` stay intact.
    pub fn match_action(&self, line: &str, seated: &[&str]) -> Option<ParsedAction> {
        let actor = split_actor(line, seated);
        for rule in &self.rules {
            let parsed = match rule.scope {
                RuleScope::Actor => {
                    let Some((player, rest)) = actor else {
                        continue;
                    };
                    rule.pattern
                        .captures(rest)
                        .and_then(|caps| decode(rule.kind, player, &caps))
                }
                RuleScope::Line => rule.pattern.captures(line).and_then(|caps| {
                    let player = caps.name("player")?.as_str().trim();
                    decode(rule.kind, player, &caps)
                }),
            };
            if parsed.is_some() {
                return parsed;
            }
        }
        None
    }

    /// Decodes `Uncalled bet (N) returned to X` into `(X, N)`.
    pub fn match_uncalled(&self, line: &str) -> Option<(String, u64)> {
        let caps = self.uncalled.captures(line)?;
        Some((
            caps.name("player")?.as_str().to_string(),
            parse_chips(caps.name("amount")?.as_str())?,
        ))
    }

    pub fn is_informational(&self, line: &str) -> bool {
        self.informational.is_match(line)
    }
}

fn actor(kind: ActionKind, pattern: &str) -> ActionRule {
    ActionRule {
        kind,
        scope: RuleScope::Actor,
        pattern: re(pattern),
    }
}

fn line(kind: ActionKind, pattern: &str) -> ActionRule {
    ActionRule {
        kind,
        scope: RuleScope::Line,
        pattern: re(pattern),
    }
}

fn decode(kind: ActionKind, player: &str, caps: &Captures<'_>) -> Option<ParsedAction> {
    let amount = match caps.name("amount") {
        Some(m) => parse_chips(m.as_str())?,
        None => 0,
    };
    let raise_to = match caps.name("to") {
        Some(m) => Some(parse_chips(m.as_str())?),
        None => None,
    };
    let cards = caps
        .name("cards")
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    Some(ParsedAction {
        player: player.to_string(),
        kind,
        amount,
        raise_to,
        cards,
        is_all_in: caps.name("allin").is_some(),
    })
}

/// Splits `NAME: rest`, preferring the longest seated name that prefixes the line.
pub fn split_actor<'l>(line: &'l str, seated: &[&str]) -> Option<(&'l str, &'l str)> {
    let known = seated
        .iter()
        .filter(|name| {
            line.len() > name.len() + 1
                && line.starts_with(**name)
                && line[name.len()..].starts_with(": ")
        })
        .max_by_key(|name| name.len());
    if let Some(name) = known {
        return Some((&line[..name.len()], &line[name.len() + 2..]));
    }
    line.split_once(": ")
}

/// Parses a chip amount, stripping `,` separators and currency symbols.
/// Fractional amounts are not chips and yield `None`.
pub fn parse_chips(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '€' | '£'))
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Normalises a raw text line: strips a UTF-8 BOM and surrounding whitespace.
pub fn clean_line(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}
