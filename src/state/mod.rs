//! State management module
//!
//! This module holds the shared countdown state and the timer state enum.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::TimerState;
