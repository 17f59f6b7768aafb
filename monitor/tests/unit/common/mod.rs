//! Shared fixtures for the integration tests
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use easywash_api::Machine;
use serde_json::{json, Value};

/// Fixed service-local "now" used across tests
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 14)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Stamp as the service writes it
pub fn stamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

pub fn minutes_ago(minutes: i64) -> NaiveDateTime {
    now() - Duration::minutes(minutes)
}

/// Wire record of a healthy idle washer, patched with `overrides`
pub fn machine_json(overrides: Value) -> Value {
    let mut base = json!({
        "id": "1042",
        "mnr": "3",
        "typ": "Waschmaschine",
        "status": 1,
        "fehler": 0,
        "restzeit": 0,
        "waschgang": 0,
        "programm": 6,
        "zeitstempel": {"date": stamp(minutes_ago(1)), "timezone_type": 3, "timezone": "Europe/Berlin"},
        "positionx": 1,
        "positiony": 2,
        "positionz": 0
    });

    if let (Some(base_map), Value::Object(patch)) = (base.as_object_mut(), overrides) {
        for (key, value) in patch {
            base_map.insert(key, value);
        }
    }
    base
}

pub fn machine(overrides: Value) -> Machine {
    serde_json::from_value(machine_json(overrides)).unwrap()
}

/// Full room response body, compact like the service sends it
pub fn room_body(name: &str, machines: Vec<Value>) -> String {
    json!({
        "result": {
            "head": {"status": "ok"},
            "body": {"objekt": {"raum": {"bezeichnung": name, "maschinen": machines}}}
        }
    })
    .to_string()
}
