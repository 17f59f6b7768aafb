//! Machine state interpretation
//!
//! Turns raw machine records into display-ready views: a status class, an
//! estimate of the remaining minutes and a multi-line summary. Everything
//! here is a pure function of the record and the service-local "now".

pub mod summary;
pub mod tables;

use chrono::NaiveDateTime;
use easywash_api::{Machine, MachineKind, Room};

use crate::errors::MonitorError;
use crate::interpret::tables::LookupTables;

/// A machine silent for longer than this is considered offline (36 hours)
pub const MAX_SIGNAL_AGE_MINUTES: i64 = 60 * 36;

/// Reported remaining times above this are not trusted
pub const MAX_TRUSTED_REMAINING_MINUTES: i64 = 100;

/// Offset at which the service reports remaining time one hour too long
const SKEWED_TIMEZONE_OFFSET_MINUTES: i32 = -120;
const SKEW_CORRECTION_MINUTES: i64 = 60;

/// Availability class of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Free,
    InUse,
    /// Coded failure or no data
    Error,
    /// No signal within [`MAX_SIGNAL_AGE_MINUTES`]
    NoSignalError,
}

/// Display-ready view of one machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineView {
    /// "{typ} {mnr}"
    pub name: String,
    pub number: String,
    pub kind: MachineKind,
    pub status_class: StatusClass,
    /// Estimate, only while a cycle is running
    pub remaining_minutes: Option<i64>,
    /// Tooltip text, one field per line
    pub summary: String,
}

/// Interprets machine records against fixed lookup tables
#[derive(Debug, Clone)]
pub struct Interpreter {
    tables: LookupTables,
    timezone_offset_minutes: i32,
}

impl Interpreter {
    /// `timezone_offset_minutes` is the deployment's offset in minutes to
    /// add to local time to reach UTC (CEST is -120)
    pub fn new(tables: LookupTables, timezone_offset_minutes: i32) -> Self {
        Self {
            tables,
            timezone_offset_minutes,
        }
    }

    /// Whole minutes since the machine last reported, rounded
    pub fn signal_age_minutes(machine: &Machine, now: NaiveDateTime) -> i64 {
        let seconds = (now - machine.zeitstempel.date).num_seconds();
        (seconds as f64 / 60.0).round() as i64
    }

    pub fn classify(&self, machine: &Machine, now: NaiveDateTime) -> StatusClass {
        if machine.fehler > 0 || machine.status == -1 {
            StatusClass::Error
        } else if Self::signal_age_minutes(machine, now) > MAX_SIGNAL_AGE_MINUTES {
            StatusClass::NoSignalError
        } else if machine.is_active() {
            StatusClass::InUse
        } else {
            StatusClass::Free
        }
    }

    /// Remaining minutes of the running cycle, never negative
    ///
    /// Implausible reports fall back to the nominal program length minus the
    /// time since the last signal.
    pub fn remaining_minutes(&self, machine: &Machine, now: NaiveDateTime) -> i64 {
        let mut reported = machine.restzeit;
        if self.timezone_offset_minutes == SKEWED_TIMEZONE_OFFSET_MINUTES {
            reported -= SKEW_CORRECTION_MINUTES;
        }

        let estimate = if reported > MAX_TRUSTED_REMAINING_MINUTES {
            self.tables.program_duration(machine.programm)
                - Self::signal_age_minutes(machine, now)
        } else {
            reported
        };
        estimate.max(0)
    }

    pub fn interpret(
        &self,
        machine: &Machine,
        now: NaiveDateTime,
    ) -> Result<MachineView, MonitorError> {
        let summary = summary::summarize(&self.tables, machine, now)?;

        Ok(MachineView {
            name: machine_name(machine),
            number: machine.mnr.clone(),
            kind: machine.kind(),
            status_class: self.classify(machine, now),
            remaining_minutes: machine
                .is_active()
                .then(|| self.remaining_minutes(machine, now)),
            summary,
        })
    }

    /// Views for every machine of a room, in service order
    pub fn interpret_room(
        &self,
        room: &Room,
        now: NaiveDateTime,
    ) -> Result<Vec<MachineView>, MonitorError> {
        room.maschinen
            .iter()
            .map(|machine| self.interpret(machine, now))
            .collect()
    }
}

pub fn machine_name(machine: &Machine) -> String {
    format!("{} {}", machine.typ, machine.mnr)
}
