//! Poll loop tests with in-memory room sources

mod common;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use common::{machine_json, minutes_ago, now, room_body, stamp};
use laundry_monitor::errors::{ErrorKind, MonitorError};
use laundry_monitor::filesys::dir::Dir;
use laundry_monitor::http::source::RoomStateSource;
use laundry_monitor::interpret::tables::LookupTables;
use laundry_monitor::interpret::Interpreter;
use laundry_monitor::models::snapshot::{RoomState, Snapshot};
use laundry_monitor::storage::layout::StorageLayout;
use laundry_monitor::storage::snapshots::SnapshotStore;
use laundry_monitor::utils::ServiceClock;
use laundry_monitor::workers::poller::{Options, PollLoop, Stage};

const ROOM: u32 = 5015;

// ================================= SOURCES ==================================== //

/// Always answers with the same body
struct StaticSource {
    body: String,
}

#[async_trait]
impl RoomStateSource for StaticSource {
    async fn fetch(&self, _room_number: u32) -> Result<RoomState, MonitorError> {
        let snapshot = Snapshot::parse(self.body.clone())?;
        let room = snapshot.room()?;
        Ok(RoomState { snapshot, room })
    }
}

/// Always fails with a fresh error
struct FailingSource {
    error: fn() -> MonitorError,
}

#[async_trait]
impl RoomStateSource for FailingSource {
    async fn fetch(&self, _room_number: u32) -> Result<RoomState, MonitorError> {
        Err((self.error)())
    }
}

fn poll_loop<S: RoomStateSource>(root: &Path, source: S) -> PollLoop<S> {
    PollLoop::new(
        Options {
            room_number: ROOM,
            interval: Duration::from_secs(60),
            verbose: true,
        },
        source,
        Interpreter::new(LookupTables::default(), -60),
        SnapshotStore::new(layout(root)),
        ServiceClock::new(-60),
    )
}

fn layout(root: &Path) -> StorageLayout {
    StorageLayout::new(Dir::new(root.join("serve")), Dir::new(root.join("logs")))
}

fn mixed_room() -> String {
    room_body(
        "Haus 5",
        vec![
            machine_json(json!({"mnr": "1"})),
            machine_json(json!({"mnr": "2", "waschgang": 1, "restzeit": 30})),
            machine_json(json!({"mnr": "3", "typ": "Trockner", "fehler": 4})),
            machine_json(json!({
                "mnr": "4",
                "typ": "Trockner",
                "zeitstempel": {"date": stamp(minutes_ago(3000))}
            })),
        ],
    )
}

fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

// ================================== CYCLES ==================================== //

#[tokio::test]
async fn test_cycle_writes_snapshot_page_and_log() {
    let dir = tempfile::tempdir().unwrap();
    let body = mixed_room();
    let poller = poll_loop(dir.path(), StaticSource { body: body.clone() });

    let report = assert_ok!(poller.run_cycle_at(now()).await);
    assert_eq!(report.room_name, "Haus 5");
    assert_eq!(
        (report.machines, report.free, report.in_use, report.faulty),
        (4, 1, 1, 2)
    );

    let layout = layout(dir.path());
    let snapshot = read(layout.snapshot_file(ROOM).path());
    assert_eq!(String::from_utf8(snapshot).unwrap(), body);

    let page = String::from_utf8(read(layout.page_file(ROOM).path())).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("Waschmaschinen in Haus 5"));
    assert!(page.contains("12:00 Uhr aktualisiert"));
    assert!(page.contains("<h2>Trockner</h2>"));

    let log_path = dir.path().join("logs").join("2024-05-14-room-5015.log");
    let log = String::from_utf8(read(&log_path)).unwrap();
    assert_eq!(log, format!("2024-05-14 12:00:00,{}\n", body));

    let (_, payload) = log.trim_end().split_once(',').unwrap();
    let logged: Value = serde_json::from_str(payload).unwrap();
    let served: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(logged, served);
}

#[tokio::test]
async fn test_log_is_appended_and_split_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let poller = poll_loop(dir.path(), StaticSource { body: mixed_room() });

    let evening = now() + ChronoDuration::hours(11) + ChronoDuration::minutes(59);
    let next_morning = evening + ChronoDuration::minutes(2);
    for at in [now(), evening, next_morning] {
        assert_ok!(poller.run_cycle_at(at).await);
    }

    let logs = dir.path().join("logs");
    let first_day = std::fs::read_to_string(logs.join("2024-05-14-room-5015.log")).unwrap();
    let second_day = std::fs::read_to_string(logs.join("2024-05-15-room-5015.log")).unwrap();

    let stamps: Vec<&str> = first_day.lines().map(|l| &l[..19]).collect();
    assert_eq!(stamps, vec!["2024-05-14 12:00:00", "2024-05-14 23:59:00"]);
    assert_eq!(second_day.lines().count(), 1);
    assert!(second_day.starts_with("2024-05-15 00:01:00,"));
}

#[tokio::test]
async fn test_multiline_body_is_logged_on_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let compact: Value = serde_json::from_str(&mixed_room()).unwrap();
    let pretty = serde_json::to_string_pretty(&compact).unwrap();
    let poller = poll_loop(dir.path(), StaticSource { body: pretty.clone() });

    assert_ok!(poller.run_cycle_at(now()).await);

    // the served snapshot stays byte-identical to the response
    let snapshot = read(layout(dir.path()).snapshot_file(ROOM).path());
    assert_eq!(snapshot, pretty.as_bytes());

    let log = std::fs::read_to_string(dir.path().join("logs/2024-05-14-room-5015.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
    let (_, payload) = log.trim_end().split_once(',').unwrap();
    assert_eq!(serde_json::from_str::<Value>(payload).unwrap(), compact);
}

#[tokio::test]
async fn test_failed_fetch_leaves_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let good = poll_loop(dir.path(), StaticSource { body: mixed_room() });
    assert_ok!(good.run_cycle_at(now()).await);

    let layout = layout(dir.path());
    let log_path = dir.path().join("logs/2024-05-14-room-5015.log");
    let before = (
        read(layout.snapshot_file(ROOM).path()),
        read(layout.page_file(ROOM).path()),
        read(&log_path),
    );

    let failing = poll_loop(
        dir.path(),
        FailingSource {
            error: || MonitorError::TimeoutError("no answer within 200s".to_string()),
        },
    );
    let failure = assert_err!(failing.run_cycle_at(now() + ChronoDuration::minutes(1)).await);
    assert_eq!(failure.stage, Stage::Fetch);
    assert_eq!(failure.kind, ErrorKind::Timeout);
    assert_eq!(failure.last_raw, None);

    let after = (
        read(layout.snapshot_file(ROOM).path()),
        read(layout.page_file(ROOM).path()),
        read(&log_path),
    );
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_contract_violation_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let body = room_body(
        "Haus 5",
        vec![machine_json(json!({"mnr": "1", "fehler": 9}))],
    );
    let poller = poll_loop(dir.path(), StaticSource { body: body.clone() });

    let failure = assert_err!(poller.run_cycle_at(now()).await);
    assert_eq!(failure.stage, Stage::Render);
    assert_eq!(failure.kind, ErrorKind::DataContract);
    assert!(matches!(failure.error, MonitorError::DataContractError(_)));
    assert_eq!(failure.last_raw.as_deref(), Some(body.as_str()));

    let layout = layout(dir.path());
    assert!(!layout.snapshot_file(ROOM).exists().await);
    assert!(!layout.page_file(ROOM).exists().await);
    assert!(!dir.path().join("logs/2024-05-14-room-5015.log").exists());
}

// ================================== LOOP ====================================== //

/// Counts ERROR events
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

async fn run_once<S: RoomStateSource>(poller: &PollLoop<S>) -> usize {
    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    poller
        .run(|_| std::future::pending::<()>(), Box::pin(async {}))
        .await;

    errors.load(Ordering::SeqCst)
}

#[tokio::test]
async fn test_failed_cycle_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let poller = poll_loop(
        dir.path(),
        FailingSource {
            error: || MonitorError::AuthError("HTTP 403 Forbidden: ungültiges token".to_string()),
        },
    );

    assert_eq!(run_once(&poller).await, 1);
}

#[tokio::test]
async fn test_successful_cycle_reports_no_error() {
    let dir = tempfile::tempdir().unwrap();
    let poller = poll_loop(dir.path(), StaticSource { body: mixed_room() });

    assert_eq!(run_once(&poller).await, 0);
    assert!(layout(dir.path()).page_file(ROOM).exists().await);
}
