//! Tooltip summary of a machine

use chrono::NaiveDateTime;
use easywash_api::Machine;

use crate::errors::MonitorError;
use crate::interpret::tables::{door_text, status_text, LookupTables};
use crate::interpret::{machine_name, Interpreter, MAX_SIGNAL_AGE_MINUTES};

/// One line per field; door and temperatures only when reported
pub fn summarize(
    tables: &LookupTables,
    machine: &Machine,
    now: NaiveDateTime,
) -> Result<String, MonitorError> {
    let mut lines = vec![
        machine_name(machine),
        format!("ID: {}", machine.id),
        format!("Status: {}", status_text(machine.status)),
        format!("Restzeit: {} min", machine.restzeit),
        tables.failure_text(machine.fehler)?.to_string(),
        last_signal_line(machine, now),
        format!("Waschgang: {}", machine.waschgang),
        format!("Programm: {}", tables.program_text(machine.programm)),
        format!(
            "Position: ({},{},{})",
            machine.positionx, machine.positiony, machine.positionz
        ),
    ];

    if machine.tuer.is_some() || machine.locked.is_some() {
        let is_open = machine.tuer.unwrap_or(0) != 0;
        let is_locked = machine.locked.unwrap_or(0) != 0;
        lines.push(format!("Tür {}", door_text(is_open, is_locked)));
    }
    if let Some(target) = &machine.solltemperatur {
        lines.push(format!("Solltemperatur: {}", target));
    }
    if let Some(actual) = &machine.isttemperatur {
        lines.push(format!("Isttemperatur: {}", actual));
    }

    Ok(lines.join("\n"))
}

/// Time only for recent signals, full date otherwise
fn last_signal_line(machine: &Machine, now: NaiveDateTime) -> String {
    let stamp = machine.zeitstempel.date;
    if Interpreter::signal_age_minutes(machine, now) < MAX_SIGNAL_AGE_MINUTES {
        format!("Letztes Signal: {} Uhr", stamp.format("%H:%M:%S"))
    } else {
        format!("Letztes Signal: {}", stamp.format("%Y-%m-%d %H:%M:%S"))
    }
}
