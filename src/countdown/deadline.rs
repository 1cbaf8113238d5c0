//! Deadline selection and remaining-time breakdown

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::recurrence::OccurrenceList;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_WEEK: u64 = 604_800;

/// Time left until (or since) a deadline, floor-decomposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    /// Decompose a count of whole seconds
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// Percent of a week already elapsed, rounded to two decimals
    pub fn week_progress(&self) -> f64 {
        let left = self.total_seconds().min(SECONDS_PER_WEEK) as f64;
        let week = SECONDS_PER_WEEK as f64;
        let percent = (week - left) / week * 100.0;
        (percent * 100.0).round() / 100.0
    }

    /// Format as "3 days 04:05:06"
    pub fn format(&self) -> String {
        format!(
            "{} days {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Pick the next deadline from the occurrence list.
///
/// An occurrence on now's calendar date is returned immediately, whatever
/// the time of day. Otherwise the first occurrence at `target_time` that is
/// not before `now` wins. `None` means every occurrence is in the past.
pub fn select_next_deadline(
    occurrences: &OccurrenceList,
    target_time: NaiveTime,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let today = now.date();

    occurrences.iter().find_map(|&date| {
        let candidate = date.and_time(target_time);
        if date == today || candidate >= now {
            Some(candidate)
        } else {
            None
        }
    })
}

/// Absolute difference between `deadline` and `now`, floored to whole seconds
pub fn compute_remaining(deadline: NaiveDateTime, now: NaiveDateTime) -> RemainingTime {
    let total = (deadline - now).num_seconds().unsigned_abs();
    RemainingTime::from_seconds(total)
}
