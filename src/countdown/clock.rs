//! Sources of "now" for the countdown

use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

/// Provides the current local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Whether successive calls can return different instants
    fn is_frozen(&self) -> bool {
        false
    }
}

/// Reads the system clock and converts it into a fixed time zone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock stopped at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock {
    at: NaiveDateTime,
}

impl FrozenClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Capture the current reading of another clock
    pub fn capture(clock: &dyn Clock) -> Self {
        Self::new(clock.now())
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }

    fn is_frozen(&self) -> bool {
        true
    }
}

/// Parse an IANA time zone name such as "America/Chicago"
pub fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow!("invalid timezone '{raw}': expected an IANA name like 'America/Chicago'"))
}

/// Guess the host time zone, falling back to UTC
pub fn detect_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => match name.parse::<Tz>() {
            Ok(tz) => {
                debug!("Detected host time zone: {}", tz);
                tz
            }
            Err(_) => {
                warn!("Host time zone '{}' is not a known IANA zone, using UTC", name);
                Tz::UTC
            }
        },
        Err(e) => {
            warn!("Could not detect host time zone ({}), using UTC", e);
            Tz::UTC
        }
    }
}
