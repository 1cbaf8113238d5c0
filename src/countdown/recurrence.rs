//! Weekly recurrence rule and occurrence generation

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

/// Days between two consecutive occurrences
const DAYS_IN_WEEK: i64 = 7;

/// Upper bound on the horizon, roughly a century of weeks
pub const MAX_HORIZON_WEEKS: u32 = 5_218;

/// Time formats accepted for the end time, tried in order
const TIME_FORMATS: [&str; 4] = ["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];

/// Date formats accepted for the start date, tried in order
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// A weekly recurrence: every `target_weekday` at `target_time`,
/// starting from `anchor_date`, for `horizon_weeks` weeks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub anchor_date: NaiveDate,
    pub target_weekday: Weekday,
    pub target_time: NaiveTime,
    pub horizon_weeks: u32,
}

impl RecurrenceSpec {
    /// Build a recurrence, rejecting an empty horizon or one whose last
    /// occurrence falls outside the representable calendar
    pub fn new(
        anchor_date: NaiveDate,
        target_weekday: Weekday,
        target_time: NaiveTime,
        horizon_weeks: u32,
    ) -> Result<Self> {
        if horizon_weeks == 0 {
            bail!("weeks to recur must be at least 1");
        }
        if horizon_weeks > MAX_HORIZON_WEEKS {
            bail!("weeks to recur must be at most {MAX_HORIZON_WEEKS}, got {horizon_weeks}");
        }

        let spec = Self {
            anchor_date,
            target_weekday,
            target_time,
            horizon_weeks,
        };

        let span = Duration::days((horizon_weeks as i64 - 1) * DAYS_IN_WEEK);
        spec.checked_first_occurrence()
            .and_then(|first| first.checked_add_signed(span))
            .ok_or_else(|| {
                anyhow!("{horizon_weeks} weeks from {anchor_date} runs past the last supported date")
            })?;

        Ok(spec)
    }

    /// First date on or after the anchor that falls on the target weekday
    pub fn first_occurrence(&self) -> NaiveDate {
        self.checked_first_occurrence().unwrap_or(NaiveDate::MAX)
    }

    fn checked_first_occurrence(&self) -> Option<NaiveDate> {
        let anchor = self.anchor_date.weekday().num_days_from_sunday() as i64;
        let target = self.target_weekday.num_days_from_sunday() as i64;
        let offset = (target - anchor).rem_euclid(DAYS_IN_WEEK);
        self.anchor_date.checked_add_signed(Duration::days(offset))
    }
}

/// Ordered weekly occurrence dates, fixed once generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceList(Vec<NaiveDate>);

impl OccurrenceList {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }
}

/// Generate `count` dates one week apart, starting at the first occurrence
/// of the target weekday on or after the anchor date.
///
/// Generation stops early at the end of the representable calendar.
pub fn compute_occurrences(spec: &RecurrenceSpec, count: u32) -> OccurrenceList {
    let dates = match spec.checked_first_occurrence() {
        Some(first) => (0..count as i64)
            .map_while(|week| first.checked_add_signed(Duration::days(week * DAYS_IN_WEEK)))
            .collect(),
        None => Vec::new(),
    };

    OccurrenceList(dates)
}

/// Parse a weekday name such as "Sunday" or "sun" (case-insensitive)
pub fn parse_weekday(raw: &str) -> Result<Weekday> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| anyhow!("invalid end day '{raw}': expected a weekday name like 'Sunday'"))
}

/// Parse a time of day like "11:59:59 pm", "05:05 am", "23:59:59" or "18:30"
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime> {
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            anyhow!("invalid end time '{raw}': expected a format like '11:59:59 pm' or '23:59:59'")
        })
}

/// Parse a start date like "04/25/2018" or "2018-04-25"
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            anyhow!("invalid start date '{raw}': expected MM/DD/YYYY or YYYY-MM-DD")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sunday_spec(anchor: NaiveDate, weeks: u32) -> RecurrenceSpec {
        RecurrenceSpec::new(
            anchor,
            Weekday::Sun,
            NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            weeks,
        )
        .unwrap()
    }

    #[test]
    fn first_occurrence_moves_forward_to_weekday() {
        // 2018-04-25 is a Wednesday
        let spec = sunday_spec(date(2018, 4, 25), 4);
        assert_eq!(spec.first_occurrence(), date(2018, 4, 29));
    }

    #[test]
    fn first_occurrence_keeps_anchor_on_matching_weekday() {
        let spec = sunday_spec(date(2018, 4, 29), 4);
        assert_eq!(spec.first_occurrence(), date(2018, 4, 29));
    }

    #[test]
    fn occurrences_are_weekly_on_target_weekday() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            for offset in 0..7 {
                let anchor = date(2024, 2, 26) + Duration::days(offset);
                let spec = RecurrenceSpec::new(anchor, weekday, NaiveTime::MIN, 10).unwrap();
                let list = compute_occurrences(&spec, spec.horizon_weeks);

                assert_eq!(list.len(), 10);
                assert!(list.first().unwrap() >= anchor);
                assert!(list.iter().all(|d| d.weekday() == weekday));
                for pair in list.dates().windows(2) {
                    assert_eq!(pair[1] - pair[0], Duration::days(7));
                }
            }
        }
    }

    #[test]
    fn zero_count_yields_empty_list() {
        let spec = sunday_spec(date(2024, 1, 1), 1);
        assert!(compute_occurrences(&spec, 0).is_empty());
    }

    #[test]
    fn rejects_zero_horizon() {
        let err = RecurrenceSpec::new(date(2024, 1, 1), Weekday::Sun, NaiveTime::MIN, 0);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_horizon_past_the_calendar() {
        let too_long = RecurrenceSpec::new(date(2018, 4, 25), Weekday::Sun, NaiveTime::MIN, 20_000_000);
        assert!(too_long.is_err());

        let near_max = RecurrenceSpec::new(date(262_140, 1, 1), Weekday::Sun, NaiveTime::MIN, 5_000);
        let err = near_max.unwrap_err().to_string();
        assert!(err.contains("last supported date"));

        let longest = RecurrenceSpec::new(date(2018, 4, 25), Weekday::Sun, NaiveTime::MIN, MAX_HORIZON_WEEKS);
        assert_eq!(compute_occurrences(&longest.unwrap(), MAX_HORIZON_WEEKS).len(), MAX_HORIZON_WEEKS as usize);
    }

    #[test]
    fn generation_stops_at_calendar_end() {
        let spec = RecurrenceSpec {
            anchor_date: NaiveDate::MAX - Duration::days(20),
            target_weekday: Weekday::Sun,
            target_time: NaiveTime::MIN,
            horizon_weeks: 10,
        };
        let list = compute_occurrences(&spec, 10);
        assert!(list.len() < 10);
        assert!(list.iter().all(|d| *d <= NaiveDate::MAX));
    }

    #[test]
    fn parses_weekday_names() {
        assert_eq!(parse_weekday("Sunday").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday(" friday ").unwrap(), Weekday::Fri);
        assert_eq!(parse_weekday("tue").unwrap(), Weekday::Tue);
        assert!(parse_weekday("Funday").is_err());
    }

    #[test]
    fn parses_twelve_and_twenty_four_hour_times() {
        let t = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap();
        assert_eq!(parse_time_of_day("11:59:59 pm").unwrap(), t(23, 59, 59));
        assert_eq!(parse_time_of_day("05:05:20 PM").unwrap(), t(17, 5, 20));
        assert_eq!(parse_time_of_day("12:00:00 am").unwrap(), t(0, 0, 0));
        assert_eq!(parse_time_of_day("09:30 am").unwrap(), t(9, 30, 0));
        assert_eq!(parse_time_of_day("23:59:59").unwrap(), t(23, 59, 59));
        assert_eq!(parse_time_of_day("18:30").unwrap(), t(18, 30, 0));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_time_of_day("25:00:00").is_err());
        assert!(parse_time_of_day("noon").is_err());
        assert!(parse_time_of_day("13:00:00 pm").is_err());
    }

    #[test]
    fn parses_both_date_styles() {
        assert_eq!(parse_date("04/25/2018").unwrap(), date(2018, 4, 25));
        assert_eq!(parse_date("2018-04-25").unwrap(), date(2018, 4, 25));
        assert!(parse_date("25.04.2018").is_err());
    }
}
