//! Platform abstraction layer
//!
//! Host-facing input surface. Window creation and raw event polling stay with
//! the host; it forwards key transitions here.

pub mod input;

pub use input::{KEY_COUNT, Keys, key_code};
