use chrono::NaiveDateTime;

use crate::grammar::{parse_chips, Grammar};
use crate::model::Blinds;

/// Fields read from the `PokerStars Hand #...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub hand_id: String,
    pub tournament_id: Option<String>,
    pub game: String,
    pub level: Option<String>,
    /// `None` when the blinds group is not a chip pair (e.g. cash decimals)
    pub blinds: Option<Blinds>,
    pub timestamp: Option<NaiveDateTime>,
    pub timezone: Option<String>,
}

/// Fields read from the `Table '...' N-max Seat #B is the button` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub max_seats: Option<u8>,
    pub button_seat: u8,
}

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Finds the first header line. Returns its index within `lines` with the fields.
pub fn extract_header(g: &Grammar, lines: &[&str]) -> Option<(usize, Header)> {
    lines
        .iter()
        .enumerate()
        .find_map(|(idx, line)| parse_header_line(g, line).map(|h| (idx, h)))
}

pub fn parse_header_line(g: &Grammar, line: &str) -> Option<Header> {
    let caps = g.header.captures(line)?;
    let hand_id = caps.name("id")?.as_str().to_string();

    let blinds = caps.name("blinds").and_then(|m| {
        let b = g.header_blinds.captures(m.as_str())?;
        Some(Blinds {
            small: parse_chips(b.name("sb")?.as_str())?,
            big: parse_chips(b.name("bb")?.as_str())?,
            ante: 0,
        })
    });

    let (timestamp, timezone) = caps
        .name("date")
        .and_then(|m| g.timestamp.captures(m.as_str()))
        .map(|ts| {
            let parsed = ts
                .name("ts")
                .and_then(|t| NaiveDateTime::parse_from_str(t.as_str(), TIMESTAMP_FORMAT).ok());
            (parsed, ts.name("tz").map(|z| z.as_str().to_string()))
        })
        .unwrap_or((None, None));

    Some(Header {
        hand_id,
        tournament_id: caps.name("tid").map(|m| m.as_str().to_string()),
        game: caps.name("game").map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
        level: caps.name("level").map(|m| m.as_str().to_string()),
        blinds,
        timestamp,
        timezone,
    })
}

pub fn extract_table(g: &Grammar, lines: &[&str]) -> Option<TableInfo> {
    lines.iter().find_map(|line| {
        let caps = g.table.captures(line)?;
        Some(TableInfo {
            name: caps.name("name")?.as_str().to_string(),
            max_seats: caps.name("max").and_then(|m| m.as_str().parse().ok()),
            button_seat: caps.name("button")?.as_str().parse().ok()?,
        })
    })
}
