//! Banked-hours ("banco de horas") balance for a day.
//!
//! ```text
//! balance = worked - baseline + credit
//!
//! baseline = 0 on Saturday and Sunday, the workday length otherwise
//! credit   = abonoHoras of an approved justification, 0 otherwise
//! ```

use crate::libs::duration::{format_duration, SignedDuration};
use crate::libs::justification::Justification;
use crate::libs::record::RecordView;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Default workday length: 8 hours.
pub const DEFAULT_WORKDAY_MINUTES: i64 = 480;

/// A balance kept both as minutes and as canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub minutes: i64,
    pub text: String,
}

impl Balance {
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes,
            text: format_duration(minutes),
        }
    }

    pub fn from_duration(duration: SignedDuration) -> Self {
        Self {
            minutes: duration.minutes(),
            text: duration.to_string(),
        }
    }

    pub fn zero() -> Self {
        Self::from_minutes(0)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Expected minutes of work on a date.
pub fn baseline_minutes(date: NaiveDate, workday_minutes: i64) -> i64 {
    if is_weekend(date) {
        0
    } else {
        workday_minutes
    }
}

/// Converts a "metaHorasDia" value to minutes, rounding to the nearest minute.
///
/// Negative or non-finite values fall back to the default workday.
pub fn workday_minutes_from_hours(hours: f64) -> i64 {
    if !hours.is_finite() || hours < 0.0 {
        return DEFAULT_WORKDAY_MINUTES;
    }
    (hours * 60.0).round() as i64
}

/// Computes the day's balance from worked minutes.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use ponto::libs::balance::compute_balance;
/// use ponto::libs::justification::{Justification, JustificationStatus};
///
/// let monday = NaiveDate::from_ymd_opt(2025, 9, 22).unwrap();
/// let abono = Justification::new(JustificationStatus::Approved, "1h 0m");
/// let balance = compute_balance(480, monday, Some(&abono), 480);
/// assert_eq!(balance.minutes, 60);
/// assert_eq!(balance.text, "1h 0m");
/// ```
pub fn compute_balance(worked_minutes: i64, date: NaiveDate, justification: Option<&Justification>, workday_minutes: i64) -> Balance {
    let credit = SignedDuration::from_minutes(justification.map_or(0, Justification::credit_minutes));
    let baseline = SignedDuration::from_minutes(baseline_minutes(date, workday_minutes));
    Balance::from_duration(SignedDuration::from_minutes(worked_minutes) - baseline + credit)
}

/// Banked hours of one user, summed over the days of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBalance {
    #[serde(rename = "discordId")]
    pub discord_id: String,
    pub usuario: String,
    /// Days with both clock-in and clock-out.
    pub days: usize,
    pub worked_minutes: i64,
    pub balance: Balance,
}

impl UserBalance {
    pub fn from_views(discord_id: &str, usuario: &str, views: &[RecordView]) -> Self {
        let days = views.iter().filter(|v| v.is_complete()).count();
        let worked: SignedDuration = views.iter().map(|v| SignedDuration::parse(&v.total_horas)).sum();
        let balance: SignedDuration = views.iter().map(|v| SignedDuration::from_minutes(v.banco_horas_min)).sum();

        Self {
            discord_id: discord_id.to_string(),
            usuario: usuario.to_string(),
            days,
            worked_minutes: worked.minutes(),
            balance: Balance::from_duration(balance),
        }
    }
}
