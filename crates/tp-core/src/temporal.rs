//! Date and time-of-day normalization.
//!
//! The trip store hands us dates in several shapes. They are captured once in
//! [`Timestamp`] at the deserialization boundary and converted here; nothing
//! past this module branches on the original shape.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pre-compiled regex for `HH:MM` and `HH:MM:SS` clock times.
static CLOCK_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").unwrap());

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A date or instant as stored upstream.
///
/// Variant order matters for untagged deserialization: strings that already
/// parse as RFC 3339 land in `DateTime`, every other string in `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// A UTC instant.
    DateTime(DateTime<Utc>),
    /// Document-store timestamp object (`{seconds, nanoseconds}`).
    Epoch {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Epoch milliseconds.
    Millis(f64),
    /// Free-form text (date-only strings, clock times, garbage).
    Text(String),
    /// Anything else the store managed to write.
    Other(serde_json::Value),
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Epoch {
                seconds,
                nanoseconds,
            } => write!(f, "{seconds}s+{nanoseconds}ns"),
            Self::Millis(ms) => write!(f, "{ms}ms"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Why a value was replaced by a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningReason {
    /// The field was absent.
    Missing,
    /// The field was present but could not be interpreted.
    Unparseable { raw: String },
}

/// A non-fatal note that some input was replaced by a fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationWarning {
    /// Path of the offending field, e.g. `itinerary[2].date`.
    pub field: String,
    pub reason: WarningReason,
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            WarningReason::Missing => write!(f, "{} is missing", self.field),
            WarningReason::Unparseable { raw } => {
                write!(f, "{} could not be parsed: {raw}", self.field)
            }
        }
    }
}

/// Records a fallback on the warning channel and in the log.
fn warn(warnings: &mut Vec<NormalizationWarning>, field: &str, reason: WarningReason) {
    let warning = NormalizationWarning {
        field: field.to_string(),
        reason,
    };
    tracing::warn!(field, %warning, "substituting fallback value");
    warnings.push(warning);
}

/// Converts a timestamp to a UTC instant, if it holds one.
#[allow(clippy::cast_possible_truncation)]
pub fn to_datetime(value: &Timestamp) -> Option<DateTime<Utc>> {
    match value {
        Timestamp::DateTime(dt) => Some(*dt),
        Timestamp::Epoch {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(*seconds, *nanoseconds),
        Timestamp::Millis(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
        Timestamp::Text(s) => parse_date_text(s),
        Timestamp::Millis(_) | Timestamp::Other(_) => None,
    }
}

/// Parses RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (as UTC) or `YYYY-MM-DD`
/// (midnight UTC).
fn parse_date_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalizes a date field, falling back to `now` when it is absent or
/// unparseable.
pub fn normalize_date(
    value: Option<&Timestamp>,
    field: &str,
    now: DateTime<Utc>,
    warnings: &mut Vec<NormalizationWarning>,
) -> DateTime<Utc> {
    match value {
        None => {
            warn(warnings, field, WarningReason::Missing);
            now
        }
        Some(ts) => to_datetime(ts).unwrap_or_else(|| {
            warn(
                warnings,
                field,
                WarningReason::Unparseable {
                    raw: ts.to_string(),
                },
            );
            now
        }),
    }
}

/// Parses an `HH:MM` (or `HH:MM:SS`) clock time into minutes since midnight.
pub fn parse_clock_time(s: &str) -> Option<u32> {
    let caps = CLOCK_TIME_RE.captures(s.trim())?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    if let Some(seconds) = caps.get(3) {
        let seconds: u32 = seconds.as_str().parse().ok()?;
        if seconds >= 60 {
            return None;
        }
    }
    (hours < 24 && minutes < 60).then_some(hours * 60 + minutes)
}

/// Normalizes a time of day to minutes since midnight (0-1439).
///
/// Absent values silently become 0. Unparseable values become 0 with a
/// warning. Date-like values contribute their UTC clock time.
pub fn normalize_time_of_day(
    value: Option<&Timestamp>,
    field: &str,
    warnings: &mut Vec<NormalizationWarning>,
) -> u32 {
    let Some(ts) = value else {
        return 0;
    };

    let minutes = match ts {
        Timestamp::Text(s) => parse_clock_time(s).or_else(|| parse_date_text(s).map(minute_of_day)),
        other => to_datetime(other).map(minute_of_day),
    };

    minutes.unwrap_or_else(|| {
        warn(
            warnings,
            field,
            WarningReason::Unparseable {
                raw: ts.to_string(),
            },
        );
        0
    })
}

fn minute_of_day(dt: DateTime<Utc>) -> u32 {
    dt.hour() * 60 + dt.minute()
}

/// Formats minutes since midnight as `HH:MM`.
///
/// Values past midnight wrap around.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Number of calendar days from `start` to `end`, both included.
///
/// Returns 0 or less when `end` falls on an earlier date than `start`.
pub fn inclusive_day_span(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end.date_naive() - start.date_naive()).num_days() + 1
}

/// Calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to.date_naive() - from.date_naive()).num_days()
}

/// Formats a date range as `MMM d – MMM d, yyyy`.
pub fn format_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{} \u{2013} {}",
        start.format("%b %-d"),
        end.format("%b %-d, %Y")
    )
}
