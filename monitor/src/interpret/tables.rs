//! Fixed lookup tables for coded machine fields

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::errors::MonitorError;

/// Duration assumed for programs missing from the duration table
pub const DEFAULT_PROGRAM_DURATION: i64 = 100;

const FAILURE_TEXTS: [&str; 9] = [
    "Kein Fehler",
    "Türfehler",
    "Abflussfehler",
    "Zulauffehler",
    "Aufheizfehler",
    "Temperatursensorfehler",
    "Motorfehler",
    "Balancefehler",
    "Überlauffehler",
];

const PROGRAMS: [(i64, &str, i64); 5] = [
    (5, "Koch 90°", 70),
    (6, "Normal 60°", 60),
    (7, "Normal 40°", 55),
    (10, "Fein 30°", 26),
    (11, "Wolle 30°", 30),
];

/// Immutable code → text and code → duration tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTables {
    failure_texts: Vec<String>,
    program_texts: BTreeMap<i64, String>,
    program_durations: BTreeMap<i64, i64>,
    default_program_duration: i64,
}

impl LookupTables {
    pub fn new(
        failure_texts: Vec<String>,
        program_texts: BTreeMap<i64, String>,
        program_durations: BTreeMap<i64, i64>,
        default_program_duration: i64,
    ) -> Self {
        Self {
            failure_texts,
            program_texts,
            program_durations,
            default_program_duration,
        }
    }

    /// Failure description; codes outside the table violate the data contract
    pub fn failure_text(&self, code: i64) -> Result<&str, MonitorError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.failure_texts.get(index))
            .map(String::as_str)
            .ok_or_else(|| {
                MonitorError::DataContractError(format!(
                    "error code {} outside failure table (0..{})",
                    code,
                    self.failure_texts.len()
                ))
            })
    }

    /// Program label, unknown programs render as their number
    pub fn program_text(&self, code: i64) -> String {
        self.program_texts
            .get(&code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    /// Nominal program length in minutes
    pub fn program_duration(&self, code: i64) -> i64 {
        self.program_durations
            .get(&code)
            .copied()
            .unwrap_or(self.default_program_duration)
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::new(
            FAILURE_TEXTS.iter().map(|t| t.to_string()).collect(),
            PROGRAMS
                .iter()
                .map(|(code, text, _)| (*code, text.to_string()))
                .collect(),
            PROGRAMS
                .iter()
                .map(|(code, _, minutes)| (*code, *minutes))
                .collect(),
            DEFAULT_PROGRAM_DURATION,
        )
    }
}

/// Power status label, unknown values render as their number
pub fn status_text(status: i64) -> Cow<'static, str> {
    match status {
        -1 => Cow::Borrowed("Keine Daten"),
        0 => Cow::Borrowed("Aus"),
        1 => Cow::Borrowed("An"),
        other => Cow::Owned(other.to_string()),
    }
}

/// Door label, a locked door wins over an open one
pub fn door_text(is_open: bool, is_locked: bool) -> &'static str {
    if is_locked {
        "verriegelt"
    } else if is_open {
        "auf"
    } else {
        "zu"
    }
}
