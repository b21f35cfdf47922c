//! Time log entries
//!
//! Line grammar: `[(HH:MM)  ]task  MM-DD HH:MM  (MM-DD HH:MM|--)`

use chrono::{Duration, NaiveDateTime};

use super::error::{ParseError, TymeError};
use super::line::{is_word_run, Field, Fields};
use super::task::{COLUMN_GAP, NAME_WIDTH};
use super::time::{format_duration, format_time, Clock};

/// Marker written in place of the end time of a running entry
pub const OPEN_END: &str = "--";

/// One clock-in/clock-out interval.
///
/// The task is referenced by name only. It may not resolve to any task in the
/// sheet, for example after a hand edit renamed the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    task: String,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
}

impl TimeEntry {
    /// Creates an entry, failing if `end` is before `start`
    pub fn new(
        task: impl Into<String>,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
    ) -> Result<Self, TymeError> {
        if let Some(end) = end {
            check_order(start, end)?;
        }
        Ok(Self {
            task: task.into(),
            start,
            end,
        })
    }

    /// Creates a running entry
    pub fn open(task: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            task: task.into(),
            start,
            end: None,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Checks that the entry could be closed at `at`
    pub fn can_close_at(&self, at: NaiveDateTime) -> Result<(), TymeError> {
        check_order(self.start, at)
    }

    /// Sets the end time. Only valid on an open entry.
    pub(crate) fn close(&mut self, at: NaiveDateTime) -> Result<(), TymeError> {
        debug_assert!(self.is_open());
        self.can_close_at(at)?;
        self.end = Some(at);
        Ok(())
    }

    /// Length of the interval; a running entry counts up to `now`
    pub fn duration(&self, now: NaiveDateTime) -> Duration {
        self.end.unwrap_or(now) - self.start
    }

    /// Parses one time log line
    pub fn parse(line: &str, clock: &Clock) -> Result<Self, ParseError> {
        let mut fields = Fields::new(line);
        fields.skip_duration();

        let task = fields.expect(Field::Name, |t| is_word_run(t).then_some(t))?;
        let start = fields.expect(Field::Start, |t| clock.parse_full(t).ok())?;
        let end = fields.expect(Field::End, |t| match t {
            OPEN_END => Some(None),
            _ => clock.parse_full(t).ok().map(Some),
        })?;
        fields.finish()?;

        Self::new(task, start, end).map_err(|source| ParseError::InvalidEntry {
            line: line.to_string(),
            source,
        })
    }

    /// Renders this entry as a line
    pub fn render(&self, clock: &Clock) -> String {
        let end = self.end.map_or_else(|| OPEN_END.to_string(), format_time);
        format!(
            "{total}{gap}{task:<nw$}{gap}{start}{gap}{end}",
            total = format_duration(self.duration(clock.now())),
            gap = COLUMN_GAP,
            task = self.task,
            nw = NAME_WIDTH,
            start = format_time(self.start),
        )
    }
}

fn check_order(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), TymeError> {
    if end < start {
        return Err(TymeError::EndsBeforeStart {
            start: format_time(start),
            end: format_time(end),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn clock() -> Clock {
        Clock::default().frozen_at(at(10, 17, 12, 0))
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = TimeEntry::new("t", at(10, 17, 9, 0), Some(at(10, 17, 8, 59))).unwrap_err();
        assert!(matches!(err, TymeError::EndsBeforeStart { .. }));
    }

    #[test]
    fn zero_length_entry_is_allowed() {
        assert!(TimeEntry::new("t", at(10, 17, 9, 0), Some(at(10, 17, 9, 0))).is_ok());
    }

    #[test]
    fn parse_closed_entry() {
        let entry = TimeEntry::parse("(00:55)  go to bed  10-10 07:15   10-10 08:10   ", &clock()).unwrap();
        assert_eq!(entry.task(), "go to bed");
        assert_eq!(entry.start(), at(10, 10, 7, 15));
        assert_eq!(entry.end(), Some(at(10, 10, 8, 10)));
    }

    #[test]
    fn parse_open_entry() {
        let entry = TimeEntry::parse("write   10-17 11:00   --", &clock()).unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.duration(clock().now()), Duration::minutes(60));
    }

    #[test]
    fn parse_reports_failing_field() {
        assert!(matches!(
            TimeEntry::parse("write   10-17 11:00", &clock()),
            Err(ParseError::MissingField { field: Field::End, .. })
        ));
        assert!(matches!(
            TimeEntry::parse("write   11:00   --", &clock()),
            Err(ParseError::BadField { field: Field::Start, .. })
        ));
        assert!(matches!(
            TimeEntry::parse("(00:10)", &clock()),
            Err(ParseError::MissingField { field: Field::Name, .. })
        ));
    }

    #[test]
    fn parse_inverted_entry_fails() {
        assert!(matches!(
            TimeEntry::parse("write   10-17 11:00   10-17 10:00", &clock()),
            Err(ParseError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn render_closed_and_open() {
        let closed = TimeEntry::new("write report", at(10, 17, 9, 0), Some(at(10, 17, 9, 45))).unwrap();
        assert_eq!(
            closed.render(&clock()),
            "(00:45)   write report           10-17 09:00   10-17 09:45"
        );

        let open = TimeEntry::open("write report", at(10, 17, 11, 30));
        assert_eq!(
            open.render(&clock()),
            "(00:30)   write report           10-17 11:30   --"
        );
    }

    #[test]
    fn close_rejects_earlier_time() {
        let mut entry = TimeEntry::open("t", at(10, 17, 9, 0));
        assert!(entry.close(at(10, 17, 8, 0)).is_err());
        assert!(entry.is_open());
        entry.close(at(10, 17, 9, 30)).unwrap();
        assert_eq!(entry.end(), Some(at(10, 17, 9, 30)));
    }
}
