//! Per-day time slot analysis.
//!
//! # Algorithm Summary
//!
//! 1. Normalize every activity's start to minutes since midnight and sort
//!    (stable, so ties keep itinerary order)
//! 2. Mark every pair of half-open intervals `[start, start + duration)` that
//!    overlap as conflicting, on both sides
//! 3. Walk the sorted activities, tracking the latest end seen so far, and
//!    emit free slots for the gaps inside the planning window

use crate::config::AnalysisConfig;
use crate::model::Activity;
use crate::output::{DetailedActivity, TimeSlot};
use crate::temporal::{NormalizationWarning, normalize_time_of_day};

/// Normalizes and sorts a day's activities.
///
/// `field` prefixes warning paths (e.g. `itinerary[0]`). Conflicts are left
/// empty and every activity starts out weather-suitable.
pub fn schedule_activities(
    activities: &[Activity],
    day_number: u32,
    field: &str,
    config: &AnalysisConfig,
    warnings: &mut Vec<NormalizationWarning>,
) -> Vec<DetailedActivity> {
    let mut scheduled: Vec<DetailedActivity> = activities
        .iter()
        .enumerate()
        .map(|(i, activity)| {
            let start = normalize_time_of_day(
                activity.start_time.as_ref(),
                &format!("{field}.activities[{i}].startTime"),
                warnings,
            );
            let duration = activity
                .duration
                .unwrap_or(config.default_duration_minutes);
            DetailedActivity {
                activity: activity.clone(),
                day_number,
                start_minute: start,
                end_minute: start.saturating_add(duration),
                conflicts: Vec::new(),
                weather_suitable: true,
            }
        })
        .collect();

    // sort_by_key is stable
    scheduled.sort_by_key(|a| a.start_minute);
    scheduled
}

/// Returns true if two half-open intervals overlap.
const fn overlaps(a: &DetailedActivity, b: &DetailedActivity) -> bool {
    a.start_minute < b.end_minute && a.end_minute > b.start_minute
}

/// Records every pairwise overlap on both activities involved.
pub fn detect_conflicts(activities: &mut [DetailedActivity]) {
    // Collect pairs first to avoid borrow issues
    let mut pairs = Vec::new();
    for i in 0..activities.len() {
        for j in (i + 1)..activities.len() {
            if overlaps(&activities[i], &activities[j]) {
                pairs.push((i, j));
            }
        }
    }

    for (i, j) in pairs {
        let name_i = activities[i].activity.name.clone();
        let name_j = activities[j].activity.name.clone();
        activities[i].conflicts.push(name_j);
        activities[j].conflicts.push(name_i);
    }
}

/// Clips a slot to the planning window.
fn clip(slot: TimeSlot, window: TimeSlot) -> Option<TimeSlot> {
    let start = slot.start.max(window.start);
    let end = slot.end.min(window.end);
    (end > start).then_some(TimeSlot { start, end })
}

/// Computes the unscheduled slots of a day.
///
/// `activities` must be sorted by start. Returns slots inside the planning
/// window that last at least `min_free_slot_minutes`.
pub fn free_time_slots(activities: &[DetailedActivity], config: &AnalysisConfig) -> Vec<TimeSlot> {
    let window = TimeSlot {
        start: config.window_start_minute,
        end: config.window_end_minute,
    };

    let Some((first, rest)) = activities.split_first() else {
        return vec![window];
    };

    let mut candidates = Vec::new();
    if first.start_minute > window.start {
        candidates.push(TimeSlot {
            start: window.start,
            end: first.start_minute,
        });
    }

    let mut latest_end = first.end_minute;
    for next in rest {
        if next.start_minute.saturating_sub(latest_end) > config.gap_threshold_minutes {
            candidates.push(TimeSlot {
                start: latest_end,
                end: next.start_minute,
            });
        }
        latest_end = latest_end.max(next.end_minute);
    }

    if latest_end < window.end {
        candidates.push(TimeSlot {
            start: latest_end,
            end: window.end,
        });
    }

    candidates
        .into_iter()
        .filter_map(|slot| clip(slot, window))
        .filter(|slot| slot.duration() >= config.min_free_slot_minutes)
        .collect()
}
