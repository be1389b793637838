//! Settings loading
//!
//! Precedence: CLI flags > config file > defaults. The CLI applies its flags
//! on top of what [`load_settings`] returns.

pub mod loader;

pub use loader::{load_settings, Settings};
