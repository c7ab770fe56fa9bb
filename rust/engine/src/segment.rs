//! Splitting a raw export into single-hand blocks.

/// Start of every hand header line.
pub const HEADER_PREFIX: &str = "PokerStars ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Fragments shorter than this (in characters, after trimming) are noise.
    pub min_block_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig { min_block_len: 40 }
    }
}

/// A piece of the input between hand starts or blank-line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Starts with a hand header.
    Hand(&'a str),
    /// Looks like a hand body (`Seat ` or `*** ` lines) but has no header.
    Headerless(&'a str),
}

impl<'a> Fragment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Fragment::Hand(t) | Fragment::Headerless(t) => t,
        }
    }
}

pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX) && line.contains("Hand #")
}

/// Splits `text` into hand blocks with the default configuration.
pub fn segment(text: &str) -> Vec<&str> {
    segment_with(text, &SegmenterConfig::default())
}

pub fn segment_with<'a>(text: &'a str, config: &SegmenterConfig) -> Vec<&'a str> {
    segment_detailed(text, config)
        .into_iter()
        .filter_map(|f| match f {
            Fragment::Hand(t) => Some(t),
            Fragment::Headerless(_) => None,
        })
        .collect()
}

/// Splits `text` and keeps headerless hand-like fragments, in input order.
/// Blocks borrow from `text`; nothing is copied.
pub fn segment_detailed<'a>(text: &'a str, config: &SegmenterConfig) -> Vec<Fragment<'a>> {
    let mut spans: Vec<&'a str> = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut blank_run = 0;
    let mut offset = 0;

    for raw in text.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();
        let line = crate::grammar::clean_line(raw);

        if line.is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                if let Some(s) = start.take() {
                    spans.push(&text[s..end]);
                }
            }
            continue;
        }
        blank_run = 0;

        if is_header_line(line) {
            if let Some(s) = start.take() {
                spans.push(&text[s..end]);
            }
        }
        if start.is_none() {
            start = Some(line_start);
        }
        end = offset;
    }
    if let Some(s) = start.take() {
        spans.push(&text[s..end]);
    }

    spans
        .into_iter()
        .filter_map(|span| classify(span.trim_start_matches('\u{feff}').trim(), config))
        .collect()
}

fn classify<'a>(block: &'a str, config: &SegmenterConfig) -> Option<Fragment<'a>> {
    if block.chars().count() < config.min_block_len {
        return None;
    }
    let mut lines = block.lines().map(crate::grammar::clean_line);
    if lines.clone().any(is_header_line) {
        return Some(Fragment::Hand(block));
    }
    if lines.any(|l| l.starts_with("Seat ") || l.starts_with("*** ")) {
        return Some(Fragment::Headerless(block));
    }
    None
}
