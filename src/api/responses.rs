//! API response structures

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    countdown::{CountdownSnapshot, RemainingTime},
    state::TimerState,
};

/// Countdown status with timer details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: TimerState,
    pub remaining: RemainingTime,
    pub time_remaining: String,
    pub progress: f64,
    pub next_deadline: Option<NaiveDateTime>,
    pub now: NaiveDateTime,
    pub timezone: String,
    pub debug: bool,
    pub weeks_to_recur: u32,
    pub uptime: String,
}

impl StatusResponse {
    /// Build a status response from the latest snapshot
    pub fn from_snapshot(
        snapshot: CountdownSnapshot,
        timezone: String,
        debug: bool,
        weeks_to_recur: u32,
        uptime: String,
    ) -> Self {
        Self {
            state: snapshot.state,
            remaining: snapshot.remaining,
            time_remaining: snapshot.time_remaining,
            progress: snapshot.progress,
            next_deadline: snapshot.deadline,
            now: snapshot.now,
            timezone,
            debug,
            weeks_to_recur,
            uptime,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
