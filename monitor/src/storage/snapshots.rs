//! Snapshot, page and data log persistence

use chrono::NaiveDateTime;
use tracing::debug;

use crate::errors::MonitorError;
use crate::models::snapshot::Snapshot;
use crate::render::Page;
use crate::storage::layout::StorageLayout;

/// Timestamp format of data log lines
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sole writer of the per-room files
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    layout: StorageLayout,
}

impl SnapshotStore {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    /// Replace the latest snapshot and page of a room
    ///
    /// Both files are swapped in atomically, so the file server never reads a
    /// half-written page.
    pub async fn persist_snapshot(
        &self,
        room_number: u32,
        snapshot: &Snapshot,
        page: &Page,
    ) -> Result<(), MonitorError> {
        let snapshot_file = self.layout.snapshot_file(room_number);
        snapshot_file.write_atomic(snapshot.raw().as_bytes()).await?;

        let page_file = self.layout.page_file(room_number);
        page_file.write_atomic(page.to_html().as_bytes()).await?;

        debug!(
            "Wrote {} and {}",
            snapshot_file.path().display(),
            page_file.path().display()
        );
        Ok(())
    }

    /// Append `"<timestamp>,<raw snapshot>"` to the room's log of that day
    pub async fn append_log(
        &self,
        room_number: u32,
        snapshot: &Snapshot,
        timestamp: NaiveDateTime,
    ) -> Result<(), MonitorError> {
        let log_file = self.layout.data_log_file(room_number, timestamp.date());
        let line = format!(
            "{},{}",
            timestamp.format(LOG_TIMESTAMP_FORMAT),
            snapshot.log_payload()
        );
        log_file.append_line(&line).await
    }
}
