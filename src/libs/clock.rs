//! Wall-clock `HH:MM` values and timezone correction.
//!
//! Clock-in and clock-out are stored as plain `HH:MM` strings, with `"-"` as
//! the "no value" sentinel. Older records were written in UTC while the rest
//! are local time, so this module exposes the shifting primitive used to fix
//! them, together with a [`TimezoneMode`] that decides whether the shift is
//! applied when a value is written, when it is displayed, or never.

use crate::libs::error::PontoError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Timelike};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Placeholder stored and displayed for a missing clock value.
pub const SENTINEL: &str = "-";

/// Offset historically used to bring UTC-stored values to local time.
pub const DEFAULT_OFFSET_HOURS: i64 = -3;

/// Where the timezone shift is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneMode {
    /// Values are already local; display them as stored.
    #[default]
    Never,
    /// Shift values before they are stored.
    OnWrite,
    /// Store values untouched and shift them for display.
    OnRead,
}

impl TimezoneMode {
    pub const ALL: [TimezoneMode; 3] = [TimezoneMode::Never, TimezoneMode::OnWrite, TimezoneMode::OnRead];

    pub fn label(self) -> &'static str {
        match self {
            TimezoneMode::Never => "never",
            TimezoneMode::OnWrite => "on_write",
            TimezoneMode::OnRead => "on_read",
        }
    }
}

/// Timezone handling applied to clock values on their way in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezonePolicy {
    pub mode: TimezoneMode,
    pub offset_hours: i64,
}

impl Default for TimezonePolicy {
    fn default() -> Self {
        Self {
            mode: TimezoneMode::Never,
            offset_hours: DEFAULT_OFFSET_HOURS,
        }
    }
}

impl TimezonePolicy {
    pub fn new(mode: TimezoneMode, offset_hours: i64) -> Self {
        Self { mode, offset_hours }
    }

    pub fn store(&self, time: NaiveTime) -> String {
        stored_time(time, self.mode, self.offset_hours)
    }

    pub fn display(&self, value: Option<&str>) -> String {
        display_time(value, self.mode, self.offset_hours)
    }
}

/// Parses `HH:MM`, treating the sentinel and blank text as absent.
pub fn parse_clock(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if text.is_empty() || text == SENTINEL {
        return None;
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Like [`parse_clock`] but reports malformed text as an error.
pub fn parse_clock_strict(text: &str) -> Result<NaiveTime, PontoError> {
    parse_clock(text).ok_or_else(|| PontoError::InvalidTime(text.to_string()))
}

/// Minutes since midnight of an `HH:MM` value.
pub fn minutes_of_day(text: &str) -> Option<i64> {
    parse_clock(text).map(|t| i64::from(t.hour()) * 60 + i64::from(t.minute()))
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parses `YYYY-MM-DD`, or `today` / `hoje` relative to `today`.
pub fn parse_date(text: &str, today: NaiveDate) -> Result<NaiveDate, PontoError> {
    let text = text.trim();
    match text.to_lowercase().as_str() {
        "today" | "hoje" => Ok(today),
        _ => NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| PontoError::InvalidDate(text.to_string())),
    }
}

/// Resolves the moment of an event given on the command line.
///
/// Accepts a full RFC 3339 timestamp, or `HH:MM` taken on the date and in
/// the offset of `now`.
pub fn parse_moment(text: &str, now: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>, PontoError> {
    if let Ok(moment) = DateTime::parse_from_rfc3339(text.trim()) {
        return Ok(moment);
    }
    let time = parse_clock_strict(text)?;
    now.date_naive()
        .and_time(time)
        .and_local_timezone(*now.offset())
        .single()
        .ok_or_else(|| PontoError::InvalidTime(text.to_string()))
}

/// Shifts a wall-clock time by subtracting `offset_hours`, wrapping at midnight.
///
/// With the historical offset of `-3` a value moves three hours forward.
/// Returns `None` for the sentinel or text that is not `HH:MM`.
///
/// # Examples
///
/// ```rust
/// use ponto::libs::clock::adjust_timezone;
///
/// assert_eq!(adjust_timezone("09:00", -3).as_deref(), Some("12:00"));
/// assert_eq!(adjust_timezone("22:30", -3).as_deref(), Some("01:30"));
/// assert_eq!(adjust_timezone("01:15", 3).as_deref(), Some("22:15"));
/// assert_eq!(adjust_timezone("-", -3), None);
/// ```
pub fn adjust_timezone(hhmm: &str, offset_hours: i64) -> Option<String> {
    let time = parse_clock(hhmm)?;
    // Whole days do not move a time of day
    let shift = TimeDelta::hours(offset_hours.rem_euclid(24));
    let (shifted, _) = time.overflowing_sub_signed(shift);
    Some(format_clock(shifted))
}

/// Value to persist for a clock reading under the given mode.
pub fn stored_time(time: NaiveTime, mode: TimezoneMode, offset_hours: i64) -> String {
    let text = format_clock(time);
    match mode {
        TimezoneMode::OnWrite => adjust_timezone(&text, offset_hours).unwrap_or(text),
        TimezoneMode::Never | TimezoneMode::OnRead => text,
    }
}

/// Value to show for a stored clock reading under the given mode.
///
/// Missing values render as the sentinel. Unparseable stored text is shown
/// unchanged so that corrupt data stays visible.
pub fn display_time(value: Option<&str>, mode: TimezoneMode, offset_hours: i64) -> String {
    match value {
        None => SENTINEL.to_string(),
        Some(text) if parse_clock(text).is_none() => {
            if text.trim().is_empty() {
                SENTINEL.to_string()
            } else {
                text.to_string()
            }
        }
        Some(text) => match mode {
            TimezoneMode::OnRead => adjust_timezone(text, offset_hours).unwrap_or_else(|| text.to_string()),
            TimezoneMode::Never | TimezoneMode::OnWrite => text.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_wraps_both_directions() {
        assert_eq!(adjust_timezone("23:59", -3).as_deref(), Some("02:59"));
        assert_eq!(adjust_timezone("00:00", 1).as_deref(), Some("23:00"));
        assert_eq!(adjust_timezone("12:34", 0).as_deref(), Some("12:34"));
        assert_eq!(adjust_timezone("12:34", 24).as_deref(), Some("12:34"));
        assert_eq!(adjust_timezone("12:34", -27).as_deref(), Some("15:34"));
    }

    #[test]
    fn test_adjust_rejects_malformed() {
        assert_eq!(adjust_timezone("", -3), None);
        assert_eq!(adjust_timezone("25:00", -3), None);
        assert_eq!(adjust_timezone("noon", -3), None);
    }

    #[test]
    fn test_minutes_of_day() {
        assert_eq!(minutes_of_day("00:00"), Some(0));
        assert_eq!(minutes_of_day("18:30"), Some(1110));
        assert_eq!(minutes_of_day("-"), None);
    }

    #[test]
    fn test_display_time_modes() {
        assert_eq!(display_time(None, TimezoneMode::OnRead, -3), "-");
        assert_eq!(display_time(Some("-"), TimezoneMode::Never, -3), "-");
        assert_eq!(display_time(Some("09:00"), TimezoneMode::Never, -3), "09:00");
        assert_eq!(display_time(Some("09:00"), TimezoneMode::OnWrite, -3), "09:00");
        assert_eq!(display_time(Some("09:00"), TimezoneMode::OnRead, -3), "12:00");
        assert_eq!(display_time(Some("bogus"), TimezoneMode::OnRead, -3), "bogus");
    }

    #[test]
    fn test_stored_time_modes() {
        let time = NaiveTime::from_hms_opt(8, 5, 42).unwrap();
        assert_eq!(stored_time(time, TimezoneMode::Never, -3), "08:05");
        assert_eq!(stored_time(time, TimezoneMode::OnRead, -3), "08:05");
        assert_eq!(stored_time(time, TimezoneMode::OnWrite, -3), "11:05");
    }

    #[test]
    fn test_parse_date() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 22).unwrap();
        assert_eq!(parse_date("today", today), Ok(today));
        assert_eq!(parse_date(" Hoje ", today), Ok(today));
        assert_eq!(parse_date("2025-01-31", today), Ok(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert_eq!(parse_date("31/01/2025", today), Err(PontoError::InvalidDate("31/01/2025".to_string())));
    }

    #[test]
    fn test_parse_moment() {
        let now = DateTime::parse_from_rfc3339("2025-09-22T15:00:00-03:00").unwrap();
        let at_nine = parse_moment("09:10", now).unwrap();
        assert_eq!(at_nine.to_rfc3339(), "2025-09-22T09:10:00-03:00");

        let explicit = parse_moment("2025-09-21T08:00:00+00:00", now).unwrap();
        assert_eq!(explicit.date_naive(), NaiveDate::from_ymd_opt(2025, 9, 21).unwrap());
        assert!(matches!(parse_moment("9h", now), Err(PontoError::InvalidTime(_))));
    }
}
