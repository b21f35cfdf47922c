//! Timestamps and durations
//!
//! Every timestamp in a sheet is normalized to a single sentinel year so that
//! the `MM-DD HH:MM` format round-trips. Arithmetic therefore ignores real
//! year boundaries: an entry running from 12-31 to 01-01 computes a negative
//! (clamped) duration. This is a known limitation of the format.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Format used for every timestamp written to a sheet
pub const TIME_FORMAT: &str = "%m-%d %H:%M";

/// Year all timestamps are normalized to unless configured otherwise
pub const DEFAULT_SENTINEL_YEAR: i32 = 2000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid time '{0}': expected 'MM-DD HH:MM' or 'HH:MM'")]
    InvalidTime(String),

    #[error("Sentinel year {0} is not a leap year")]
    NotLeapYear(i32),
}

/// Source of "now" and the sentinel year used to read and write timestamps.
///
/// A clock is passed explicitly to everything that parses or renders time so
/// no part of the crate depends on ambient global state. Tests freeze it with
/// [`Clock::frozen_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    year: i32,
    frozen: Option<NaiveDateTime>,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            year: DEFAULT_SENTINEL_YEAR,
            frozen: None,
        }
    }
}

impl Clock {
    /// Creates a clock normalizing to `year`.
    ///
    /// The year must be a leap year so that `02-29` is representable.
    pub fn new(year: i32) -> Result<Self, TimeError> {
        if NaiveDate::from_ymd_opt(year, 2, 29).is_none() {
            return Err(TimeError::NotLeapYear(year));
        }
        Ok(Self { year, frozen: None })
    }

    /// Returns a copy of this clock that always reports `now`
    pub fn frozen_at(self, now: NaiveDateTime) -> Self {
        Self {
            frozen: Some(self.normalize(now)),
            ..self
        }
    }

    /// The sentinel year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The current moment, normalized to the sentinel year
    pub fn now(&self) -> NaiveDateTime {
        match self.frozen {
            Some(now) => now,
            None => self.normalize(Local::now().naive_local()),
        }
    }

    /// Moves a timestamp into the sentinel year
    pub fn normalize(&self, time: NaiveDateTime) -> NaiveDateTime {
        // Cannot fail: the sentinel year is a leap year.
        time.with_year(self.year).unwrap_or(time)
    }

    /// Parses a full `MM-DD HH:MM` timestamp or a bare `HH:MM`.
    ///
    /// A bare time is placed on today's date, which is ambiguous across
    /// midnight. The ambiguity is left to the caller.
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, TimeError> {
        let text = text.trim();
        if let Ok(time) = self.parse_full(text) {
            return Ok(time);
        }

        let time = NaiveTime::parse_from_str(text, "%H:%M")
            .map_err(|_| TimeError::InvalidTime(text.to_string()))?;
        Ok(self.now().date().and_time(time))
    }

    /// Parses only the full `MM-DD HH:MM` form, as written in a sheet
    pub fn parse_full(&self, text: &str) -> Result<NaiveDateTime, TimeError> {
        let text = text.trim();
        NaiveDateTime::parse_from_str(&format!("{}-{}", self.year, text), "%Y-%m-%d %H:%M")
            .map_err(|_| TimeError::InvalidTime(text.to_string()))
    }
}

/// Formats a timestamp as `MM-DD HH:MM`
pub fn format_time(time: NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Formats a duration as `(HH:MM)`.
///
/// Truncates to the whole minute and never wraps hours at 24. Negative
/// durations render as `(00:00)`.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_seconds().max(0) / 60;
    format!("({:02}:{:02})", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn clock() -> Clock {
        Clock::default().frozen_at(at(10, 17, 12, 30))
    }

    #[test]
    fn parse_full_timestamp() {
        assert_eq!(clock().parse("10-03 09:15").unwrap(), at(10, 3, 9, 15));
    }

    #[test]
    fn parse_accepts_unpadded_fields() {
        assert_eq!(clock().parse("1-5 9:05").unwrap(), at(1, 5, 9, 5));
    }

    #[test]
    fn bare_time_uses_today() {
        assert_eq!(clock().parse("08:40").unwrap(), at(10, 17, 8, 40));
    }

    #[test]
    fn leap_day_is_representable() {
        assert_eq!(clock().parse("02-29 23:59").unwrap(), at(2, 29, 23, 59));
    }

    #[test]
    fn parse_full_rejects_bare_time() {
        assert!(clock().parse_full("08:40").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            clock().parse("tomorrow"),
            Err(TimeError::InvalidTime("tomorrow".to_string()))
        );
        assert!(clock().parse("13-01 10:00").is_err());
        assert!(clock().parse("25:00").is_err());
    }

    #[test]
    fn non_leap_sentinel_is_rejected() {
        assert_eq!(Clock::new(2001), Err(TimeError::NotLeapYear(2001)));
        assert_eq!(Clock::new(2024).unwrap().year(), 2024);
    }

    #[test]
    fn frozen_clock_is_normalized() {
        let real = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let clock = Clock::default().frozen_at(real);
        assert_eq!(clock.now(), at(3, 1, 7, 0));
    }

    #[test]
    fn system_clock_uses_sentinel_year() {
        assert_eq!(Clock::default().now().year(), DEFAULT_SENTINEL_YEAR);
    }

    #[test]
    fn format_time_round_trips() {
        let time = at(4, 9, 7, 5);
        assert_eq!(format_time(time), "04-09 07:05");
        assert_eq!(clock().parse(&format_time(time)).unwrap(), time);
    }

    #[test]
    fn format_duration_truncates_to_minute() {
        assert_eq!(format_duration(Duration::seconds(59)), "(00:00)");
        assert_eq!(format_duration(Duration::seconds(65 * 60 + 59)), "(01:05)");
    }

    #[test]
    fn format_duration_does_not_wrap_hours() {
        assert_eq!(format_duration(Duration::hours(123)), "(123:00)");
    }

    #[test]
    fn format_duration_clamps_negative() {
        assert_eq!(format_duration(Duration::minutes(-5)), "(00:00)");
    }
}
