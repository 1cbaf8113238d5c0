//! Deadline calculator: recurrence + now -> countdown snapshot

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::{
    deadline::{compute_remaining, select_next_deadline, RemainingTime},
    recurrence::{compute_occurrences, OccurrenceList, RecurrenceSpec},
};
use crate::state::TimerState;

/// Result of one recompute at a given "now"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountdownSnapshot {
    pub now: NaiveDateTime,
    /// `None` once every occurrence in the horizon has passed
    pub deadline: Option<NaiveDateTime>,
    pub remaining: RemainingTime,
    pub state: TimerState,
    pub progress: f64,
    pub time_remaining: String,
}

impl CountdownSnapshot {
    /// Whether the horizon ran out, as opposed to a same-day deadline passing
    pub fn is_exhausted(&self) -> bool {
        self.deadline.is_none()
    }
}

/// Computes the next deadline and remaining time for a weekly recurrence.
///
/// Occurrences are generated once at construction and never change.
#[derive(Debug, Clone)]
pub struct DeadlineCalculator {
    spec: RecurrenceSpec,
    occurrences: OccurrenceList,
    roll_past_same_day: bool,
}

impl DeadlineCalculator {
    pub fn new(spec: RecurrenceSpec) -> Self {
        let occurrences = compute_occurrences(&spec, spec.horizon_weeks);
        debug!(
            "Generated {} occurrences from {:?} to {:?}",
            occurrences.len(),
            occurrences.first(),
            occurrences.last()
        );

        Self {
            spec,
            occurrences,
            roll_past_same_day: false,
        }
    }

    /// When today is an occurrence whose time has already passed, count down
    /// to the following occurrence instead of reporting today's deadline
    pub fn rolling_past_same_day(mut self, enabled: bool) -> Self {
        self.roll_past_same_day = enabled;
        self
    }

    /// Select the deadline that applies at `now`
    pub fn next_deadline(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let deadline = select_next_deadline(&self.occurrences, self.spec.target_time, now)?;

        if self.roll_past_same_day
            && deadline.date() == now.date()
            && now.time() > self.spec.target_time
        {
            return self
                .occurrences
                .iter()
                .find(|&&date| date > now.date())
                .map(|date| date.and_time(self.spec.target_time));
        }

        Some(deadline)
    }

    /// Compute the full countdown snapshot at `now`
    pub fn recompute(&self, now: NaiveDateTime) -> CountdownSnapshot {
        let deadline = self.next_deadline(now);

        let (remaining, state) = match deadline {
            Some(deadline) => (
                compute_remaining(deadline, now),
                TimerState::classify(deadline, now),
            ),
            None => (RemainingTime::default(), TimerState::Expired),
        };

        CountdownSnapshot {
            now,
            deadline,
            remaining,
            state,
            progress: remaining.week_progress(),
            time_remaining: remaining.format(),
        }
    }
}
