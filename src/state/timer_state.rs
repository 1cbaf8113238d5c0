//! Countdown timer state

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether the countdown is still running or the deadline has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Counting,
    Expired,
}

impl TimerState {
    /// Counting while the deadline is strictly after now, expired otherwise
    pub fn classify(deadline: NaiveDateTime, now: NaiveDateTime) -> Self {
        if deadline > now {
            TimerState::Counting
        } else {
            TimerState::Expired
        }
    }

    /// Check if the countdown is still running
    pub fn is_counting(&self) -> bool {
        matches!(self, TimerState::Counting)
    }

    pub fn is_expired(&self) -> bool {
        !self.is_counting()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Counting => "counting",
            TimerState::Expired => "expired",
        }
    }
}
