//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Session seeding
//! - The JS-facing engine handle (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Err only means a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    // Err only means a logger is already installed
    let _ = env_logger::try_init();
}

/// A fresh seed for a new session
#[cfg(target_arch = "wasm32")]
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// A fresh seed for a new session
#[cfg(not(target_arch = "wasm32"))]
pub fn session_seed() -> u64 {
    rand::random()
}
