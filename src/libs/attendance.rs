//! Worked-time aggregation for a single day.
//!
//! Given clock-in, clock-out and the break intervals of a day, computes the
//! minutes worked and the minutes spent on breaks.
//!
//! ## Rules
//!
//! - Only closed breaks count. The break total is summed in seconds and then
//!   rounded half-up to whole minutes.
//! - A break whose end precedes its start is ignored.
//! - The shift span is `saida - entrada` on the same day; there is no
//!   cross-midnight handling.
//! - Worked time is the span minus the break total.
//! - When either clock value is missing nothing is computed and both totals
//!   are zero.
//! - A shift that ends before it starts, or whose breaks exceed the span, is
//!   clamped to zero worked minutes and flagged with a [`ShiftAnomaly`].

use crate::libs::clock::minutes_of_day;
use crate::libs::justification::Justification;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A break within a shift. `fim` is absent while the break is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub inicio: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fim: Option<DateTime<FixedOffset>>,
}

impl BreakInterval {
    pub fn open(inicio: DateTime<FixedOffset>) -> Self {
        Self { inicio, fim: None }
    }

    pub fn closed(inicio: DateTime<FixedOffset>, fim: DateTime<FixedOffset>) -> Self {
        Self { inicio, fim: Some(fim) }
    }

    pub fn is_open(&self) -> bool {
        self.fim.is_none()
    }

    /// Length in seconds of a closed, well-ordered interval.
    pub fn duration_seconds(&self) -> Option<i64> {
        let seconds = (self.fim? - self.inicio).num_seconds();
        (seconds >= 0).then_some(seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftAnomaly {
    /// `saida` is earlier than `entrada`.
    EndsBeforeStart,
    /// Breaks add up to more than the shift span.
    BreaksExceedShift,
}

impl fmt::Display for ShiftAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShiftAnomaly::EndsBeforeStart => write!(f, "clock-out before clock-in"),
            ShiftAnomaly::BreaksExceedShift => write!(f, "breaks longer than the shift"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkedTime {
    pub worked_minutes: i64,
    pub break_minutes: i64,
    /// False when clock-in or clock-out was missing and nothing was computed.
    pub computed: bool,
    pub anomaly: Option<ShiftAnomaly>,
}

impl WorkedTime {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Total minutes of the closed breaks.
pub fn break_minutes(pausas: &[BreakInterval]) -> i64 {
    let seconds: i64 = pausas.iter().filter_map(BreakInterval::duration_seconds).sum();
    (seconds + 30).div_euclid(60)
}

/// The open break of a day, if any.
pub fn open_break(pausas: &[BreakInterval]) -> Option<&BreakInterval> {
    pausas.iter().find(|p| p.is_open())
}

/// Computes worked and break minutes from the raw clock values and breaks.
///
/// # Examples
///
/// ```rust
/// use chrono::DateTime;
/// use ponto::libs::attendance::{compute_worked, BreakInterval};
///
/// let lunch = BreakInterval::closed(
///     DateTime::parse_from_rfc3339("2025-09-22T12:00:00Z").unwrap(),
///     DateTime::parse_from_rfc3339("2025-09-22T13:00:00Z").unwrap(),
/// );
/// let worked = compute_worked(Some("09:00"), Some("18:00"), &[lunch]);
/// assert_eq!(worked.break_minutes, 60);
/// assert_eq!(worked.worked_minutes, 480);
/// ```
pub fn compute_worked(entrada: Option<&str>, saida: Option<&str>, pausas: &[BreakInterval]) -> WorkedTime {
    compute_with_breaks(entrada, saida, || break_minutes(pausas))
}

/// Same as [`compute_worked`], but an approved justification's manual break
/// total replaces the measured breaks.
pub fn compute_worked_with_override(
    entrada: Option<&str>,
    saida: Option<&str>,
    pausas: &[BreakInterval],
    justification: Option<&Justification>,
) -> WorkedTime {
    match justification.and_then(Justification::manual_break_minutes) {
        Some(manual) => compute_with_breaks(entrada, saida, || manual),
        None => compute_worked(entrada, saida, pausas),
    }
}

fn compute_with_breaks(entrada: Option<&str>, saida: Option<&str>, breaks: impl FnOnce() -> i64) -> WorkedTime {
    let (Some(start), Some(end)) = (entrada.and_then(minutes_of_day), saida.and_then(minutes_of_day)) else {
        return WorkedTime::zero();
    };
    let break_minutes = breaks();

    let raw_span = end - start;
    if raw_span < 0 {
        warn!(entrada = ?entrada, saida = ?saida, "shift ends before it starts, worked time clamped to zero");
        return WorkedTime {
            worked_minutes: 0,
            break_minutes,
            computed: true,
            anomaly: Some(ShiftAnomaly::EndsBeforeStart),
        };
    }

    let worked_minutes = raw_span - break_minutes;
    if worked_minutes < 0 {
        warn!(raw_span, break_minutes, "breaks exceed shift span, worked time clamped to zero");
        return WorkedTime {
            worked_minutes: 0,
            break_minutes,
            computed: true,
            anomaly: Some(ShiftAnomaly::BreaksExceedShift),
        };
    }

    WorkedTime {
        worked_minutes,
        break_minutes,
        computed: true,
        anomaly: None,
    }
}
