//! Configuration and CLI argument handling

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Parser;

use crate::countdown::{
    clock::{detect_timezone, parse_timezone},
    recurrence::{parse_date, parse_time_of_day, parse_weekday},
    RecurrenceSpec,
};

pub const DEFAULT_TEXT_COLOR: &str = "green";
pub const DEFAULT_END_TIME_TEXT: &str = "Sorry, this event has expired.";

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "countdown-recur")]
#[command(about = "Serve a recurring weekly countdown timer as an embeddable HTML fragment")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Color of the countdown text
    #[arg(long, default_value = DEFAULT_TEXT_COLOR)]
    pub text_color: String,

    /// Message shown once the countdown has ended
    #[arg(long, default_value = DEFAULT_END_TIME_TEXT)]
    pub end_time_text: String,

    /// Freeze "now" at startup so the rendered countdown never changes
    #[arg(short, long)]
    pub debug: bool,

    /// Weekday the countdown ends on
    #[arg(long, default_value = "Sunday")]
    pub end_day: String,

    /// Time of day the countdown ends, e.g. "11:59:59 pm" or "23:59:59"
    #[arg(long, default_value = "11:59:59 pm")]
    pub end_time: String,

    /// First date of the recurrence, MM/DD/YYYY or YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Number of weeks the countdown recurs for
    #[arg(short, long, default_value = "104")]
    pub weeks_to_recur: u32,

    /// IANA time zone for "now" (defaults to the host time zone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validate the raw arguments into countdown settings
    pub fn settings(&self) -> Result<CountdownSettings> {
        let timezone = match &self.timezone {
            Some(raw) => parse_timezone(raw)?,
            None => detect_timezone(),
        };

        let start_date = match &self.start_date {
            Some(raw) => parse_date(raw)?,
            None => today_in(timezone),
        };

        let recurrence = RecurrenceSpec::new(
            start_date,
            parse_weekday(&self.end_day)?,
            parse_time_of_day(&self.end_time)?,
            self.weeks_to_recur,
        )
        .context("invalid recurrence")?;

        Ok(CountdownSettings {
            recurrence,
            text_color: self.text_color.clone(),
            end_time_text: self.end_time_text.clone(),
            debug: self.debug,
            timezone,
        })
    }
}

/// Validated countdown configuration, fixed for the life of the process
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownSettings {
    pub recurrence: RecurrenceSpec,
    pub text_color: String,
    pub end_time_text: String,
    pub debug: bool,
    pub timezone: Tz,
}

impl CountdownSettings {
    /// Settings with the default text and color for a given recurrence
    pub fn new(recurrence: RecurrenceSpec, timezone: Tz) -> Self {
        Self {
            recurrence,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            end_time_text: DEFAULT_END_TIME_TEXT.to_string(),
            debug: false,
            timezone,
        }
    }
}

fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}
