//! Domain errors that callers are expected to match on.
//!
//! Everything else travels as `anyhow::Error`; these variants cover the
//! attendance rules a caller may want to report differently (for instance a
//! chat bot answering "you are already on a break").

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PontoError {
    #[error("a break is already in progress since {0}")]
    BreakAlreadyOpen(String),

    #[error("there is no break in progress")]
    NoOpenBreak,

    #[error("no clock-in recorded for {user} on {date}")]
    MissingClockIn { user: String, date: NaiveDate },

    #[error("already clocked in at {0}")]
    AlreadyClockedIn(String),

    #[error("already clocked out at {0}")]
    AlreadyClockedOut(String),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid page cursor '{0}'")]
    InvalidCursor(String),

    #[error("lookback of {0} days reaches past the supported calendar")]
    InvalidLookback(i64),
}
