//! Laundry Monitor Library
//!
//! Polls the EasyWash service for one laundry room, interprets the machine
//! telemetry and keeps a static status page, the latest raw snapshot and a
//! daily raw data log on disk.

pub mod app;
pub mod authn;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod interpret;
pub mod logs;
pub mod models;
pub mod render;
pub mod storage;
pub mod utils;
pub mod workers;
