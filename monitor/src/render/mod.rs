//! Status page rendering

pub mod page;

pub use page::{render_room, Page};
