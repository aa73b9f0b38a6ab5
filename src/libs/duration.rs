//! Signed duration parsing and formatting.
//!
//! Every time amount the application stores or displays ("total_horas",
//! "total_pausas", "banco_horas", "abonoHoras") uses the textual form
//! `"<sign><hours>h <minutes>m"`. This module converts between that text and a
//! signed count of minutes, which is the canonical value for all arithmetic.
//!
//! ## Grammars
//!
//! Two grammars exist and they are intentionally kept apart:
//!
//! - **General duration** ([`parse_duration`]): `-?\d+h\s*\d+(\.\d+)?(m|min)?`.
//!   Accepts a leading minus, decimal minutes (rounded half-up) and an optional
//!   `m`/`min` suffix. Malformed input resolves to `0` minutes.
//! - **Total pauses** ([`parse_total_pausas`]): `\d+h\s*\d+(\.\d+)?m`. No sign,
//!   the literal `m` is mandatory and decimal minutes are truncated. The result
//!   is canonical text, and malformed input resolves to `"0h 0m"`.
//!
//! ## Canonical Output
//!
//! [`format_duration`] always renders minutes below 60, so for every `i64`
//! `m` the law `parse_duration(Some(&format_duration(m))) == m` holds.
//!
//! ## Examples
//!
//! ```rust
//! use ponto::libs::duration::{format_duration, parse_duration, parse_total_pausas};
//!
//! assert_eq!(parse_duration(Some("-1h 30m")), -90);
//! assert_eq!(parse_duration(Some("2h 45.6m")), 166);
//! assert_eq!(parse_duration(Some("garbage")), 0);
//! assert_eq!(format_duration(-90), "-1h 30m");
//! assert_eq!(parse_total_pausas(Some("0h 75m")), "1h 15m");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Text rendered for a zero duration.
pub const ZERO_DURATION: &str = "0h 0m";

static GENERAL_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-)?(\d+)h\s*(\d+(?:\.\d+)?)(?:min|m)?$").expect("valid duration pattern"));

static TOTAL_PAUSAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)h\s*(\d+)(?:\.\d+)?m$").expect("valid total pauses pattern"));

/// A signed amount of whole minutes, used for balance arithmetic.
///
/// Addition and subtraction saturate at the `i64` bounds, so credits parsed
/// from arbitrary text cannot wrap a balance around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedDuration(i64);

impl SignedDuration {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    pub const fn minutes(self) -> i64 {
        self.0
    }

    /// Parses text with the general grammar, falling back to zero.
    pub fn parse(text: &str) -> Self {
        Self(parse_duration(Some(text)))
    }
}

impl Add for SignedDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for SignedDuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for SignedDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for SignedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.0))
    }
}

/// Parses a general signed duration into minutes.
///
/// Input is trimmed before matching. Decimal minutes are rounded half-up
/// (`45.5` becomes `46`), minutes of 60 or more are accepted as-is and the
/// optional leading minus negates the whole amount.
///
/// Parsing never fails: `None`, empty text, text of the wrong shape and
/// amounts outside the `i64` range all yield `0`. `i64::MIN` itself is in
/// range, so every value [`format_duration`] renders parses back.
///
/// # Examples
///
/// ```rust
/// use ponto::libs::duration::parse_duration;
///
/// assert_eq!(parse_duration(Some("8h 0m")), 480);
/// assert_eq!(parse_duration(Some("1h90min")), 150);
/// assert_eq!(parse_duration(Some("-0h 15")), -15);
/// assert_eq!(parse_duration(None), 0);
/// ```
pub fn parse_duration(text: Option<&str>) -> i64 {
    let Some(text) = text else {
        return 0;
    };
    let Some(caps) = GENERAL_DURATION.captures(text.trim()) else {
        return 0;
    };

    let negative = caps.get(1).is_some();
    let Ok(hours) = caps[2].parse::<i128>() else {
        return 0;
    };
    let Ok(minutes) = caps[3].parse::<f64>() else {
        return 0;
    };

    // Half-up rounding on a non-negative value
    let minutes = (minutes + 0.5).floor();
    if !minutes.is_finite() || minutes > i64::MAX as f64 {
        return 0;
    }

    // Magnitude in i128: "-153722867280912930h 8m" is exactly i64::MIN
    let total = hours.checked_mul(60).and_then(|h| h.checked_add(minutes as i128));
    let signed = match total {
        Some(total) if negative => -total,
        Some(total) => total,
        None => return 0,
    };
    i64::try_from(signed).unwrap_or(0)
}

/// Renders minutes as canonical `"<sign><h>h <m>m"` text.
///
/// The sign is `-` for negative amounts and empty otherwise, so zero renders
/// as `"0h 0m"`.
///
/// # Examples
///
/// ```rust
/// use ponto::libs::duration::format_duration;
///
/// assert_eq!(format_duration(0), "0h 0m");
/// assert_eq!(format_duration(61), "1h 1m");
/// assert_eq!(format_duration(-90), "-1h 30m");
/// ```
pub fn format_duration(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.unsigned_abs();
    format!("{}{}h {}m", sign, abs / 60, abs % 60)
}

/// Normalizes a stored "total_pausas" value with the strict pauses grammar.
///
/// Only unsigned `\d+h\s*\d+(\.\d+)?m` text is accepted; the fractional part
/// of the minutes is dropped. A match is returned in canonical form, anything
/// else (including signed values and a missing `m`) becomes `"0h 0m"`.
pub fn parse_total_pausas(text: Option<&str>) -> String {
    total_pausas_minutes(text).map_or_else(|| ZERO_DURATION.to_string(), format_duration)
}

/// Minutes behind a strict "total_pausas" value, or `None` when it does not match.
pub fn total_pausas_minutes(text: Option<&str>) -> Option<i64> {
    let caps = TOTAL_PAUSAS.captures(text?)?;
    let hours = caps[1].parse::<i64>().ok()?;
    let minutes = caps[2].parse::<i64>().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_values() {
        assert_eq!(parse_duration(Some("-1h 30m")), -90);
        assert_eq!(parse_duration(Some("2h 45.6m")), 166);
        assert_eq!(parse_duration(Some("1h 0m")), 60);
        assert_eq!(parse_duration(Some("0h 0m")), 0);
    }

    #[test]
    fn test_parse_lenient_zero() {
        assert_eq!(parse_duration(None), 0);
        assert_eq!(parse_duration(Some("")), 0);
        assert_eq!(parse_duration(Some("garbage")), 0);
        assert_eq!(parse_duration(Some("1h")), 0);
        assert_eq!(parse_duration(Some("h 30m")), 0);
        assert_eq!(parse_duration(Some("--1h 30m")), 0);
        assert_eq!(parse_duration(Some("1.5h 30m")), 0);
    }

    #[test]
    fn test_parse_suffix_variants() {
        assert_eq!(parse_duration(Some("1h 30")), 90);
        assert_eq!(parse_duration(Some("1h30m")), 90);
        assert_eq!(parse_duration(Some("1h 30min")), 90);
        assert_eq!(parse_duration(Some("  2h   5m  ")), 125);
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!(parse_duration(Some("0h 0.5m")), 1);
        assert_eq!(parse_duration(Some("0h 0.49m")), 0);
        assert_eq!(parse_duration(Some("-0h 2.5m")), -3);
    }

    #[test]
    fn test_parse_accepts_minutes_over_sixty() {
        assert_eq!(parse_duration(Some("1h 75m")), 135);
        assert_eq!(parse_duration(Some("-0h 120m")), -120);
    }

    #[test]
    fn test_parse_overflow_is_zero() {
        assert_eq!(parse_duration(Some("99999999999999999999h 0m")), 0);
        assert_eq!(parse_duration(Some("153722867280912931h 0m")), 0);
        // One past each bound
        assert_eq!(parse_duration(Some("153722867280912930h 8m")), 0);
        assert_eq!(parse_duration(Some("-153722867280912930h 9m")), 0);
        assert_eq!(parse_duration(Some("-153722867280912930h 8m")), i64::MIN);
    }

    #[test]
    fn test_format_reference_values() {
        assert_eq!(format_duration(-90), "-1h 30m");
        assert_eq!(format_duration(0), "0h 0m");
        assert_eq!(format_duration(59), "0h 59m");
        assert_eq!(format_duration(-1), "-0h 1m");
        assert_eq!(format_duration(6000), "100h 0m");
    }

    #[test]
    fn test_round_trip_law() {
        for m in (-3000..=3000).chain([i64::MAX / 120, -(i64::MAX / 120), i64::MAX, i64::MIN, i64::MIN + 1]) {
            assert_eq!(parse_duration(Some(&format_duration(m))), m, "round trip failed for {}", m);
        }
    }

    #[test]
    fn test_total_pausas_strict_grammar() {
        assert_eq!(parse_total_pausas(Some("1h 15m")), "1h 15m");
        assert_eq!(parse_total_pausas(Some("0h 75m")), "1h 15m");
        assert_eq!(parse_total_pausas(Some("0h 45.9m")), "0h 45m");
        assert_eq!(parse_total_pausas(Some("-1h 15m")), ZERO_DURATION);
        assert_eq!(parse_total_pausas(Some("1h 15")), ZERO_DURATION);
        assert_eq!(parse_total_pausas(Some("1h 15min")), ZERO_DURATION);
        assert_eq!(parse_total_pausas(None), ZERO_DURATION);
    }

    #[test]
    fn test_grammars_disagree_on_rounding_and_sign() {
        assert_eq!(parse_duration(Some("0h 45.9m")), 46);
        assert_eq!(total_pausas_minutes(Some("0h 45.9m")), Some(45));
        assert_eq!(parse_duration(Some("-0h 10m")), -10);
        assert_eq!(total_pausas_minutes(Some("-0h 10m")), None);
    }

    #[test]
    fn test_signed_duration_display_and_sum() {
        let total: SignedDuration = [30, 45, -15].into_iter().map(SignedDuration::from_minutes).sum();
        assert_eq!(total.minutes(), 60);
        assert_eq!(total.to_string(), "1h 0m");
        assert_eq!(SignedDuration::parse("-2h 0m").minutes(), -120);
    }

    #[test]
    fn test_signed_duration_saturates() {
        let max = SignedDuration::from_minutes(i64::MAX);
        assert_eq!((max + SignedDuration::from_minutes(1)).minutes(), i64::MAX);
        assert_eq!((SignedDuration::from_minutes(i64::MIN) - SignedDuration::from_minutes(480)).minutes(), i64::MIN);
        let total: SignedDuration = [max, max, SignedDuration::from_minutes(-5)].into_iter().sum();
        assert_eq!(total.minutes(), i64::MAX - 5);
    }
}
