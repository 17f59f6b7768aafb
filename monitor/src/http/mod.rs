//! EasyWash API access

pub mod auth;
pub mod client;
pub mod rooms;
pub mod source;
