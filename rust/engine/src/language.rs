//! Language pre-pass for uploaded exports.
//!
//! The parser only understands English exports. This check counts
//! language-specific phrases so localized exports can be refused with a
//! useful message before parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Portuguese,
    Spanish,
    Unknown,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::English => "english",
            Language::Portuguese => "portuguese",
            Language::Spanish => "spanish",
            Language::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LanguageReport {
    pub language: Language,
    pub is_valid: bool,
    /// Required English markers not present (English input only)
    pub missing: Vec<String>,
}

const ENGLISH: &[&str] = &[
    "PokerStars Hand",
    "Tournament",
    "Table",
    "Seat",
    "is the button",
    "posts small blind",
    "posts big blind",
    "posts the ante",
    "*** HOLE CARDS ***",
    "Dealt to",
    "folds",
    "calls",
    "bets",
    "raises",
    "checks",
    "all-in",
    "shows",
    "collected",
    "Uncalled bet",
    "returned to",
    "*** SUMMARY ***",
    "Total pot",
    "Rake",
    "Board",
    "folded",
    "won",
    "lost",
    "finished the tournament",
];

/// Markers an English export must contain to be parseable at all.
pub const REQUIRED_ENGLISH: &[&str] = &["PokerStars Hand", "Table", "Seat", "*** HOLE CARDS ***"];

const PORTUGUESE: &[&str] = &[
    "Mão PokerStars",
    "Torneio",
    "Mesa",
    "Lugar",
    "é o botão",
    "pequeno blind",
    "grande blind",
    "coloca ante",
    "paga o small blind",
    "paga o big blind",
    "*** CARTAS DA MÃO ***",
    "*** CARTAS DO BURACO ***",
    "recebe",
    "Distribuído para",
    "desiste",
    "paga",
    "aposta",
    "aumenta",
    "passa",
    "iguala",
    "mostra",
    "recebeu",
    "coleta",
    "Aposta não-igualada",
    "voltou para",
    "*** SUMÁRIO ***",
    "Total pote",
    "comissão",
    "Mesa [",
    "desistiu",
    "não apostou",
    "ganha",
    "perde",
    "terminou o torneio",
];

const SPANISH: &[&str] = &[
    "Mano PokerStars",
    "Torneo",
    "Mesa",
    "Asiento",
    "es el botón",
    "pequeña ciega",
    "gran ciega",
    "publica ante",
    "*** CARTAS AGUJERO ***",
    "Repartido a",
    "se retira",
    "paga",
    "apuesta",
    "sube",
    "pasa",
    "iguala",
    "muestra",
    "recibe",
    "Apuesta no igualada",
    "devuelto a",
    "*** RESUMEN ***",
    "Bote total",
    "Comisión",
    "Mesa [",
    "se retiró",
    "no apostó",
];

fn hits(text: &str, indicators: &[&str]) -> usize {
    indicators.iter().filter(|i| text.contains(**i)).count()
}

/// The language with strictly the most indicator hits; ties are unknown.
pub fn detect_language(text: &str) -> Language {
    let en = hits(text, ENGLISH);
    let pt = hits(text, PORTUGUESE);
    let es = hits(text, SPANISH);
    if pt > en && pt > es {
        Language::Portuguese
    } else if es > en && es > pt {
        Language::Spanish
    } else if en > pt && en > es {
        Language::English
    } else {
        Language::Unknown
    }
}

pub fn check_language(text: &str) -> LanguageReport {
    if text.trim().is_empty() {
        return LanguageReport {
            language: Language::Unknown,
            is_valid: false,
            missing: Vec::new(),
        };
    }
    let language = detect_language(text);
    let missing: Vec<String> = if language == Language::English {
        REQUIRED_ENGLISH
            .iter()
            .filter(|m| !text.contains(**m))
            .map(|m| m.to_string())
            .collect()
    } else {
        Vec::new()
    };
    LanguageReport {
        language,
        is_valid: language == Language::English && missing.is_empty(),
        missing,
    }
}

impl LanguageReport {
    /// Human-readable reason for an invalid report.
    pub fn message(&self) -> String {
        match (self.language, self.is_valid) {
            (_, true) => "valid English hand history".to_string(),
            (Language::English, false) => format!(
                "English hand history is missing required elements: {}",
                self.missing.join(", ")
            ),
            (Language::Unknown, false) => {
                "could not recognise the hand history language; export it in English".to_string()
            }
            (lang, false) => format!(
                "hand history appears to be in {lang}; re-export it with the client language set to English"
            ),
        }
    }
}
