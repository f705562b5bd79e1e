//! Shared utilities for CLI commands.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use tp_core::{Clock, FixedClock, Snapshot, SystemClock};

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:in\s+(\d+)\s+(hour|day|week)s?|(\d+)\s+(hour|day|week)s?\s+ago)$").unwrap()
});

/// Conservative bounds for relative time parsing (~1000 years in hours).
const MAX_RELATIVE_HOURS: i64 = 1000 * 365 * 24;

/// Parse a datetime string relative to `base`.
///
/// Supports:
/// - ISO 8601: "2025-03-07T10:30:00Z"
/// - Calendar date (midnight UTC): "2025-03-07"
/// - Relative: "3 days ago", "in 2 weeks", "12 hours ago"
pub fn parse_datetime_at(s: &str, base: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2025-03-07T10:30:00Z), a date (e.g., 2025-03-07) or relative (e.g., '3 days ago', 'in 2 weeks')"
        );
    };

    let (amount, unit, sign) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
        (Some(n), Some(unit), _, _) => (n.as_str(), unit.as_str(), 1),
        (_, _, Some(n), Some(unit)) => (n.as_str(), unit.as_str(), -1),
        _ => anyhow::bail!("Invalid relative time: {s}"),
    };

    let n: i64 = amount
        .parse()
        .context("failed to parse number in relative time")?;

    let hours_per_unit = match unit {
        "hour" => 1,
        "day" => 24,
        "week" => 24 * 7,
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > MAX_RELATIVE_HOURS / hours_per_unit {
        anyhow::bail!("Relative time value too large: {n} {unit}");
    }

    Ok(base + Duration::hours(sign * n * hours_per_unit))
}

/// Resolves the analysis instant from `--now`, defaulting to the system clock.
///
/// The instant is read once so that every snapshot of a run is analyzed as of
/// the same moment.
pub fn resolve_clock(now: Option<&str>) -> anyhow::Result<FixedClock> {
    let system = SystemClock.now();
    let instant = match now {
        Some(s) => parse_datetime_at(s, system)?,
        None => system,
    };
    Ok(FixedClock(instant))
}

/// Reads and decodes a snapshot file.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Snapshot::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}
