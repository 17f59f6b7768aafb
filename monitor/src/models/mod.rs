//! Domain models

pub mod snapshot;
