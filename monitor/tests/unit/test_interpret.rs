//! Interpretation unit tests

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{machine, minutes_ago, now, stamp};
use laundry_monitor::errors::MonitorError;
use laundry_monitor::interpret::tables::LookupTables;
use laundry_monitor::interpret::{Interpreter, StatusClass, MAX_SIGNAL_AGE_MINUTES};

fn interpreter() -> Interpreter {
    Interpreter::new(LookupTables::default(), -60)
}

#[test]
fn test_active_machine_reports_remaining_minutes() {
    let m = machine(json!({
        "waschgang": 1,
        "restzeit": 45,
        "zeitstempel": {"date": stamp(now())}
    }));

    let view = interpreter().interpret(&m, now()).unwrap();
    assert_eq!(view.status_class, StatusClass::InUse);
    assert_eq!(view.remaining_minutes, Some(45));
}

#[test]
fn test_implausible_remaining_time_falls_back_to_program_duration() {
    let m = machine(json!({
        "waschgang": 1,
        "restzeit": 150,
        "programm": 6,
        "zeitstempel": {"date": stamp(minutes_ago(10))}
    }));

    let view = interpreter().interpret(&m, now()).unwrap();
    assert_eq!(view.status_class, StatusClass::InUse);
    assert_eq!(view.remaining_minutes, Some(50));
}

#[test]
fn test_coded_error_is_reported_with_text() {
    let m = machine(json!({"fehler": 3, "status": 1, "waschgang": 1, "restzeit": 20}));

    let view = interpreter().interpret(&m, now()).unwrap();
    assert_eq!(view.status_class, StatusClass::Error);
    assert!(view.summary.contains("Zulauffehler"), "{}", view.summary);
}

#[test]
fn test_silent_machine_is_no_signal_error() {
    let m = machine(json!({
        "status": 1,
        "waschgang": 1,
        "restzeit": 30,
        "zeitstempel": {"date": stamp(minutes_ago(40 * 60))}
    }));

    let view = interpreter().interpret(&m, now()).unwrap();
    assert_eq!(view.status_class, StatusClass::NoSignalError);
    assert!(
        view.summary.contains("Letztes Signal: 2024-05-12 20:00:00"),
        "{}",
        view.summary
    );
}

#[test]
fn test_error_wins_over_everything() {
    let i = interpreter();
    let cases = [
        json!({"status": -1}),
        json!({"status": -1, "waschgang": 1}),
        json!({"fehler": 1, "zeitstempel": {"date": stamp(minutes_ago(5000))}}),
        json!({"fehler": 8, "waschgang": 0}),
    ];

    for overrides in cases {
        let m = machine(overrides.clone());
        assert_eq!(i.classify(&m, now()), StatusClass::Error, "{}", overrides);
    }
}

#[test]
fn test_staleness_threshold_is_exclusive() {
    let i = interpreter();

    let at_limit = machine(json!({
        "waschgang": 1,
        "zeitstempel": {"date": stamp(minutes_ago(MAX_SIGNAL_AGE_MINUTES))}
    }));
    assert_eq!(i.classify(&at_limit, now()), StatusClass::InUse);

    let past_limit = machine(json!({
        "waschgang": 0,
        "zeitstempel": {"date": stamp(minutes_ago(MAX_SIGNAL_AGE_MINUTES + 1))}
    }));
    assert_eq!(i.classify(&past_limit, now()), StatusClass::NoSignalError);
}

#[test]
fn test_idle_machine_is_free_without_remaining_time() {
    let view = interpreter()
        .interpret(&machine(json!({"waschgang": 0, "restzeit": 12})), now())
        .unwrap();

    assert_eq!(view.status_class, StatusClass::Free);
    assert_eq!(view.remaining_minutes, None);
}

#[test]
fn test_remaining_time_is_never_negative() {
    let i = interpreter();

    let negative_report = machine(json!({"waschgang": 1, "restzeit": -5}));
    assert_eq!(i.remaining_minutes(&negative_report, now()), 0);

    // Fein 30° lasts 26 minutes, the last signal is 40 minutes old
    let overdue = machine(json!({
        "waschgang": 1,
        "restzeit": 500,
        "programm": 10,
        "zeitstempel": {"date": stamp(minutes_ago(40))}
    }));
    assert_eq!(i.remaining_minutes(&overdue, now()), 0);
}

#[test]
fn test_unknown_program_assumes_default_duration() {
    let m = machine(json!({
        "waschgang": 1,
        "restzeit": 200,
        "programm": 99,
        "zeitstempel": {"date": stamp(minutes_ago(30))}
    }));
    assert_eq!(interpreter().remaining_minutes(&m, now()), 70);
}

#[test]
fn test_summer_offset_corrects_reported_time() {
    let summer = Interpreter::new(LookupTables::default(), -120);
    let winter = Interpreter::new(LookupTables::default(), -60);

    let m = machine(json!({
        "waschgang": 1,
        "restzeit": 105,
        "programm": 7,
        "zeitstempel": {"date": stamp(minutes_ago(5))}
    }));

    // 105 - 60 is trusted in summer; in winter 105 is too large and falls back to 55 - 5
    assert_eq!(summer.remaining_minutes(&m, now()), 45);
    assert_eq!(winter.remaining_minutes(&m, now()), 50);

    let corrected_below_zero = machine(json!({"waschgang": 1, "restzeit": 30}));
    assert_eq!(summer.remaining_minutes(&corrected_below_zero, now()), 0);
}

#[test]
fn test_reported_time_up_to_limit_is_used_as_is() {
    let m = machine(json!({"waschgang": 1, "restzeit": 100, "programm": 5}));
    assert_eq!(interpreter().remaining_minutes(&m, now()), 100);

    let m = machine(json!({"waschgang": 1, "restzeit": 101, "programm": 5,
        "zeitstempel": {"date": stamp(now())}}));
    assert_eq!(interpreter().remaining_minutes(&m, now()), 70);
}

#[test]
fn test_error_code_outside_table_is_contract_violation() {
    let result = interpreter().interpret(&machine(json!({"fehler": 9})), now());
    assert!(matches!(result, Err(MonitorError::DataContractError(_))));
}

#[test]
fn test_summary_lists_fields_in_order() {
    let m = machine(json!({
        "waschgang": 1,
        "restzeit": 45,
        "zeitstempel": {"date": stamp(minutes_ago(5))},
        "tuer": 0,
        "locked": 1,
        "solltemperatur": 60,
        "isttemperatur": "58"
    }));

    let view = interpreter().interpret(&m, now()).unwrap();
    assert_eq!(view.name, "Waschmaschine 3");
    assert_eq!(
        view.summary,
        "Waschmaschine 3\n\
         ID: 1042\n\
         Status: An\n\
         Restzeit: 45 min\n\
         Kein Fehler\n\
         Letztes Signal: 11:55:00 Uhr\n\
         Waschgang: 1\n\
         Programm: Normal 60°\n\
         Position: (1,2,0)\n\
         Tür verriegelt\n\
         Solltemperatur: 60\n\
         Isttemperatur: 58"
    );
}

#[test]
fn test_summary_omits_absent_door_and_temperatures() {
    let view = interpreter()
        .interpret(&machine(json!({"programm": 42})), now())
        .unwrap();

    assert!(view.summary.ends_with("Programm: 42\nPosition: (1,2,0)"), "{}", view.summary);
}

#[test]
fn test_unknown_status_keeps_room_intact() {
    let room = easywash_api::Room {
        bezeichnung: "Haus 5".to_string(),
        maschinen: vec![
            machine(json!({"mnr": "1"})),
            machine(json!({"mnr": "2", "status": 2})),
        ],
    };

    let views = interpreter().interpret_room(&room, now()).unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[1].status_class, StatusClass::Free);
    assert!(views[1].summary.contains("\nStatus: 2\n"), "{}", views[1].summary);
}
