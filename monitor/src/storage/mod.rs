//! Configuration and persisted room files

pub mod layout;
pub mod settings;
pub mod snapshots;
