//! Countdown Recur - a recurring weekly countdown timer
//!
//! This library computes the next deadline of a weekly recurrence, keeps a
//! once-per-second countdown snapshot up to date, and serves it as an HTML
//! fragment and JSON status over HTTP.

pub mod config;
pub mod countdown;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, CountdownSettings};
pub use countdown::{CountdownSnapshot, DeadlineCalculator};
pub use state::{AppState, TimerState};
pub use api::create_router;
pub use tasks::CountdownTicker;
pub use utils::signals::shutdown_signal;
