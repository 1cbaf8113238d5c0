//! Background tasks module
//!
//! This module contains the countdown refresh task that runs alongside the HTTP server.

pub mod countdown_ticker;

// Re-export main types
pub use countdown_ticker::CountdownTicker;
