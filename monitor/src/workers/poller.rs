//! Poll loop: fetch, interpret, render and persist one room per cycle

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::{debug, error, info};

use crate::errors::{ErrorKind, MonitorError};
use crate::http::source::RoomStateSource;
use crate::interpret::{Interpreter, StatusClass};
use crate::render::render_room;
use crate::storage::snapshots::SnapshotStore;
use crate::utils::ServiceClock;

/// Poll loop options
#[derive(Debug, Clone)]
pub struct Options {
    /// Room to monitor
    pub room_number: u32,

    /// Fixed pause after each cycle
    pub interval: Duration,

    /// Report every successful cycle
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            room_number: 5015,
            interval: Duration::from_secs(60),
            verbose: false,
        }
    }
}

/// Part of the cycle a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Authentication and room request
    Fetch,
    /// Interpretation and rendering
    Render,
    /// Data log, snapshot and page files
    Persist,
}

/// Outcome of a successful cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub room_name: String,
    pub machines: usize,
    pub free: usize,
    pub in_use: usize,
    pub faulty: usize,
    pub finished_at: NaiveDateTime,
}

/// A failed cycle, tagged with where and why it failed
#[derive(Debug)]
pub struct CycleFailure {
    pub kind: ErrorKind,
    pub stage: Stage,
    pub error: MonitorError,
    /// Raw body fetched before the failure, if the fetch got that far
    pub last_raw: Option<String>,
    pub at: NaiveDateTime,
}

impl CycleFailure {
    fn new(stage: Stage, error: MonitorError, last_raw: Option<&str>, at: NaiveDateTime) -> Self {
        Self {
            kind: error.kind(),
            stage,
            error,
            last_raw: last_raw.map(str::to_string),
            at,
        }
    }
}

/// Drives the fetch → interpret → render → persist cycle for one room
pub struct PollLoop<S> {
    options: Options,
    source: S,
    interpreter: Interpreter,
    store: SnapshotStore,
    clock: ServiceClock,
}

impl<S: RoomStateSource> PollLoop<S> {
    pub fn new(
        options: Options,
        source: S,
        interpreter: Interpreter,
        store: SnapshotStore,
        clock: ServiceClock,
    ) -> Self {
        Self {
            options,
            source,
            interpreter,
            store,
            clock,
        }
    }

    /// Run one cycle at the current service-local time
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleFailure> {
        self.run_cycle_at(self.clock.now()).await
    }

    /// Run one cycle as if it were `now`
    ///
    /// Nothing is written unless fetching and rendering both succeed.
    pub async fn run_cycle_at(&self, now: NaiveDateTime) -> Result<CycleReport, CycleFailure> {
        let room_number = self.options.room_number;

        let state = self
            .source
            .fetch(room_number)
            .await
            .map_err(|e| CycleFailure::new(Stage::Fetch, e, None, now))?;
        let raw = Some(state.snapshot.raw());

        let views = self
            .interpreter
            .interpret_room(&state.room, now)
            .map_err(|e| CycleFailure::new(Stage::Render, e, raw, now))?;
        let page = render_room(&state.room, &views, now);

        self.store
            .append_log(room_number, &state.snapshot, now)
            .await
            .map_err(|e| CycleFailure::new(Stage::Persist, e, raw, now))?;
        self.store
            .persist_snapshot(room_number, &state.snapshot, &page)
            .await
            .map_err(|e| CycleFailure::new(Stage::Persist, e, raw, now))?;

        let count = |class: StatusClass| views.iter().filter(|v| v.status_class == class).count();
        Ok(CycleReport {
            room_name: state.room.bezeichnung.clone(),
            machines: views.len(),
            free: count(StatusClass::Free),
            in_use: count(StatusClass::InUse),
            faulty: count(StatusClass::Error) + count(StatusClass::NoSignalError),
            finished_at: now,
        })
    }

    /// Run cycles until the shutdown signal fires
    ///
    /// A failed cycle is logged once and never retried before the next tick.
    pub async fn run<Sl, F>(
        &self,
        sleep_fn: Sl,
        mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
    ) where
        Sl: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        info!("Poll loop starting for room {}...", self.options.room_number);

        loop {
            match self.run_cycle().await {
                Ok(report) => self.report_success(&report),
                Err(failure) => report_failure(&failure),
            }

            tokio::select! {
                _ = &mut shutdown_signal => {
                    info!("Poll loop shutting down...");
                    return;
                }
                _ = sleep_fn(self.options.interval) => {
                    // Continue with the next cycle
                }
            }
        }
    }

    fn report_success(&self, report: &CycleReport) {
        if self.options.verbose {
            info!(
                "{} updated at {}: {} machines, {} free, {} in use, {} faulty",
                report.room_name,
                report.finished_at.format("%H:%M"),
                report.machines,
                report.free,
                report.in_use,
                report.faulty
            );
        } else {
            debug!("Cycle completed for {}", report.room_name);
        }
    }
}

fn report_failure(failure: &CycleFailure) {
    error!(
        kind = %failure.kind,
        stage = ?failure.stage,
        at = %failure.at.format("%Y-%m-%d %H:%M:%S"),
        last_raw = failure.last_raw.as_deref().unwrap_or(""),
        "Cycle failed: {}",
        failure.error
    );
}
