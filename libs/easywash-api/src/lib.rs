//! EasyWash API wire models
//!
//! Request envelopes and response records of the EasyWash JSON-over-POST API.
//! Field names follow the service (German); accessors on top of them live in
//! the monitor crate.

pub mod lenient;
pub mod models;

pub use models::*;
