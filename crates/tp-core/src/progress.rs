//! Plan completeness and descriptive statistics.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::config::AnalysisConfig;
use crate::model::Activity;
use crate::output::{DayContext, TimeSlot, TripProgress, TripStats};
use crate::temporal::inclusive_day_span;

/// Inclusive day count of the trip, never less than 1.
pub fn total_days(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let span = inclusive_day_span(start, end).max(1);
    u32::try_from(span).unwrap_or(u32::MAX)
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Distinct day numbers in `1..=total_days` whose entry satisfies `predicate`.
fn distinct_days(days: &[DayContext], total_days: u32, predicate: impl Fn(&DayContext) -> bool) -> u32 {
    let numbers: HashSet<u32> = days
        .iter()
        .filter(|d| (1..=total_days).contains(&d.day_number) && predicate(d))
        .map(|d| d.day_number)
        .collect();
    count_u32(numbers.len())
}

/// Computes completion metrics over the analyzed days.
///
/// Day numbers in `1..=total_days` with no itinerary entry count as empty.
/// Planned and covered days count each day number once, ignoring entries
/// outside the trip.
pub fn trip_progress(days: &[DayContext], total_days: u32, config: &AnalysisConfig) -> TripProgress {
    let mut activities_by_day: HashMap<u32, usize> = HashMap::new();
    for day in days {
        *activities_by_day.entry(day.day_number).or_insert(0) += day.activities.len();
    }

    let total_activities: usize = days.iter().map(|d| d.activities.len()).sum();
    let days_planned = distinct_days(days, total_days, |d| !d.activities.is_empty());
    let days_with_stay = distinct_days(days, total_days, |d| !d.accommodations.is_empty());

    let empty_days = (1..=total_days)
        .filter(|n| activities_by_day.get(n).copied().unwrap_or(0) == 0)
        .collect();

    let packed_days = days
        .iter()
        .filter(|d| d.activities.len() > config.packed_day_threshold)
        .map(|d| d.day_number)
        .collect();

    let total = f64::from(total_days.max(1));

    TripProgress {
        total_days,
        days_planned,
        activities_per_day: f64::from(count_u32(total_activities)) / total,
        accommodation_coverage: f64::from(days_with_stay) / total * 100.0,
        empty_days,
        packed_days,
    }
}

/// Returns true for activities worth a photo stop.
fn is_photo_spot(activity: &Activity) -> bool {
    activity.has_tag("photography")
        || activity.is_type("sightseeing")
        || activity.name.to_lowercase().contains("viewpoint")
}

/// Counts activities, photo spots, restaurants and free hours.
pub fn trip_stats(days: &[DayContext]) -> TripStats {
    let total_activities = days.iter().map(|d| d.activities.len()).sum();

    let photo_spots = days
        .iter()
        .flat_map(|d| &d.activities)
        .filter(|a| is_photo_spot(&a.activity))
        .count();

    let restaurants = days
        .iter()
        .flat_map(|d| &d.activities)
        .filter(|a| a.activity.is_type("dining") || a.activity.is_type("restaurant"))
        .count();

    let free_minutes: u32 = days
        .iter()
        .flat_map(|d| &d.free_time_slots)
        .map(TimeSlot::duration)
        .sum();

    TripStats {
        total_activities,
        photo_spots,
        restaurants,
        // Round half up
        free_time: (free_minutes + 30) / 60,
        total_distance: None,
        walking_time: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Accommodation;
    use crate::output::DetailedActivity;
    use chrono::TimeZone;

    fn detailed(name: &str, activity_type: &str, tags: &[&str]) -> DetailedActivity {
        DetailedActivity {
            activity: Activity {
                name: name.to_string(),
                activity_type: activity_type.to_string(),
                tags: tags.iter().map(ToString::to_string).collect(),
                ..Default::default()
            },
            day_number: 1,
            start_minute: 600,
            end_minute: 660,
            conflicts: Vec::new(),
            weather_suitable: true,
        }
    }

    fn day(day_number: u32, activities: Vec<DetailedActivity>, stays: usize) -> DayContext {
        DayContext {
            day_number,
            date: Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap(),
            activities,
            accommodations: vec![Accommodation::default(); stays],
            transportation: Vec::new(),
            free_time_slots: Vec::new(),
            has_breakfast: false,
            has_lunch: false,
            has_dinner: false,
            weather: None,
            total_cost: 0.0,
        }
    }

    fn many(n: usize) -> Vec<DetailedActivity> {
        (0..n).map(|i| detailed(&format!("Stop {i}"), "tour", &[])).collect()
    }

    #[test]
    fn total_days_is_inclusive_and_at_least_one() {
        let start = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 9, 0, 0, 0).unwrap();
        assert_eq!(total_days(start, end), 5);
        assert_eq!(total_days(end, start), 1);
    }

    #[test]
    fn classifies_empty_and_packed_days() {
        // Day 3 has no itinerary entry at all.
        let days = vec![day(1, many(2), 1), day(2, Vec::new(), 1), day(4, many(6), 0)];
        let progress = trip_progress(&days, 4, &AnalysisConfig::default());

        assert_eq!(progress.total_days, 4);
        assert_eq!(progress.days_planned, 2);
        assert_eq!(progress.empty_days, [2, 3]);
        assert_eq!(progress.packed_days, [4]);
        assert_eq!(progress.activities_per_day, 2.0);
        assert_eq!(progress.accommodation_coverage, 50.0);
    }

    #[test]
    fn repeated_and_out_of_range_days_count_once() {
        let days = vec![day(1, many(1), 1), day(1, many(2), 1), day(5, many(1), 1)];
        let progress = trip_progress(&days, 2, &AnalysisConfig::default());

        assert_eq!(progress.days_planned, 1);
        assert_eq!(progress.empty_days, [2]);
        assert_eq!(progress.accommodation_coverage, 50.0);
    }

    #[test]
    fn five_activities_is_not_packed() {
        let days = vec![day(1, many(5), 0)];
        let progress = trip_progress(&days, 1, &AnalysisConfig::default());
        assert!(progress.packed_days.is_empty());
    }

    #[test]
    fn empty_itinerary_is_zero_baseline() {
        let progress = trip_progress(&[], 3, &AnalysisConfig::default());
        assert_eq!(progress.days_planned, 0);
        assert_eq!(progress.empty_days, [1, 2, 3]);
        assert_eq!(progress.activities_per_day, 0.0);
        assert_eq!(progress.accommodation_coverage, 0.0);

        let stats = trip_stats(&[]);
        assert_eq!(stats.total_activities, 0);
        assert_eq!(stats.free_time, 0);
    }

    #[test]
    fn counts_photo_spots_and_restaurants() {
        let days = vec![day(
            1,
            vec![
                detailed("Old Town", "sightseeing", &[]),
                detailed("Graffiti Walk", "tour", &["Photography"]),
                detailed("Miradouro Viewpoint", "walk", &[]),
                detailed("Tasca", "dining", &[]),
                detailed("Cervejaria", "restaurant", &[]),
                detailed("Spa", "wellness", &[]),
            ],
            0,
        )];
        let stats = trip_stats(&days);
        assert_eq!(stats.total_activities, 6);
        assert_eq!(stats.photo_spots, 3);
        assert_eq!(stats.restaurants, 2);
        assert_eq!(stats.total_distance, None);
    }

    #[test]
    fn free_time_is_rounded_hours() {
        let mut first = day(1, Vec::new(), 0);
        first.free_time_slots = vec![TimeSlot {
            start: 480,
            end: 1320,
        }];
        let mut second = day(2, Vec::new(), 0);
        second.free_time_slots = vec![TimeSlot {
            start: 600,
            end: 645,
        }];
        // 840 + 45 minutes = 14.75 hours
        assert_eq!(trip_stats(&[first, second]).free_time, 15);
    }
}
