//! Countdown computation module
//!
//! Weekly recurrence generation, deadline selection, remaining-time
//! breakdown and the clocks that supply "now".

pub mod calculator;
pub mod clock;
pub mod deadline;
pub mod recurrence;

// Re-export main types
pub use calculator::{CountdownSnapshot, DeadlineCalculator};
pub use clock::{Clock, FrozenClock, SystemClock};
pub use deadline::{compute_remaining, select_next_deadline, RemainingTime};
pub use recurrence::{compute_occurrences, OccurrenceList, RecurrenceSpec};
