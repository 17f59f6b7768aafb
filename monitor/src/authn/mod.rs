//! Authentication against the EasyWash service

pub mod session;
pub mod token;
