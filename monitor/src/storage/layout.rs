//! Storage layout configuration

use chrono::NaiveDate;

use crate::errors::MonitorError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::storage::settings::Settings;

/// Where the monitor keeps its per-room files
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Latest snapshot and page, read by the static file server
    pub serve_dir: Dir,

    /// Append-only raw data logs
    pub data_log_dir: Dir,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(serve_dir: Dir, data_log_dir: Dir) -> Self {
        Self {
            serve_dir,
            data_log_dir,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Dir::new(settings.serve_dir.clone()),
            Dir::new(settings.data_log_dir.clone()),
        )
    }

    /// Latest raw snapshot of a room
    pub fn snapshot_file(&self, room_number: u32) -> File {
        self.serve_dir.file(&format!("{}.json", room_number))
    }

    /// Latest rendered page of a room
    pub fn page_file(&self, room_number: u32) -> File {
        self.serve_dir.file(&format!("{}.html", room_number))
    }

    /// Data log of a room for one calendar day
    pub fn data_log_file(&self, room_number: u32, day: NaiveDate) -> File {
        self.data_log_dir
            .file(&format!("{}-room-{}.log", day.format("%Y-%m-%d"), room_number))
    }

    /// Setup the storage layout (create directories)
    pub async fn setup(&self) -> Result<(), MonitorError> {
        self.serve_dir.create().await?;
        self.data_log_dir.create().await?;
        Ok(())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
