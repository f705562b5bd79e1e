//! Trip context assembly.
//!
//! Runs every analysis stage over one immutable snapshot and composes the
//! [`EnhancedTripContext`]. The only ambient input is the injected [`Clock`],
//! so the same snapshot and clock always yield the same [`Analysis`].

use chrono::{DateTime, Utc};

use crate::budget::{aggregate_costs, analyze_budget, day_cost, days_elapsed};
use crate::clock::Clock;
use crate::config::AnalysisConfig;
use crate::issues::detect_issues;
use crate::kinds::TravelerType;
use crate::meals::meal_coverage;
use crate::model::{Day, Snapshot, Traveler, TravelPreferences, Trip, WeatherDay};
use crate::output::{Analysis, DayContext, EnhancedTripContext, TravelerSummary, TripDates};
use crate::progress::{total_days, trip_progress, trip_stats};
use crate::schedule::{detect_conflicts, free_time_slots, schedule_activities};
use crate::temporal::{NormalizationWarning, format_date_range, normalize_date};
use crate::weather::{forecast_for_day, is_suitable};

fn has_relationship(travelers: &[Traveler], relationship: &str) -> bool {
    travelers.iter().any(|t| {
        t.relationship
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(relationship))
    })
}

/// Derives the party type from the traveler list.
///
/// An empty list is treated as a single traveler.
pub fn traveler_type(travelers: &[Traveler]) -> TravelerType {
    match travelers.len() {
        0 | 1 => TravelerType::Solo,
        2 if has_relationship(travelers, "partner") => TravelerType::Couple,
        2 => TravelerType::Friends,
        _ if has_relationship(travelers, "family") => TravelerType::Family,
        n if n > 4 => TravelerType::Group,
        _ => TravelerType::Friends,
    }
}

/// Analyzes one itinerary day.
fn analyze_day(
    day: &Day,
    index: usize,
    traveler_count: usize,
    weather: Option<&[WeatherDay]>,
    config: &AnalysisConfig,
    now: DateTime<Utc>,
    warnings: &mut Vec<NormalizationWarning>,
) -> DayContext {
    let field = format!("itinerary[{index}]");
    let date = normalize_date(day.date.as_ref(), &format!("{field}.date"), now, warnings);

    let mut activities =
        schedule_activities(&day.activities, day.day_number, &field, config, warnings);
    detect_conflicts(&mut activities);

    let forecast = forecast_for_day(weather, day.day_number);
    for activity in &mut activities {
        activity.weather_suitable = is_suitable(&activity.activity, forecast, config);
    }

    let free_time_slots = free_time_slots(&activities, config);
    let meals = meal_coverage(&activities);

    tracing::debug!(
        day = day.day_number,
        activities = activities.len(),
        free_slots = free_time_slots.len(),
        "analyzed day"
    );

    DayContext {
        day_number: day.day_number,
        date,
        accommodations: day.accommodations.clone().unwrap_or_default(),
        transportation: day.transportation.clone().unwrap_or_default(),
        free_time_slots,
        has_breakfast: meals.breakfast,
        has_lunch: meals.lunch,
        has_dinner: meals.dinner,
        weather: forecast.cloned(),
        total_cost: day_cost(day, traveler_count),
        activities,
    }
}

/// Builds the enriched context for a trip.
///
/// Never fails: malformed input degrades to fallback values, each of which is
/// reported in [`Analysis::warnings`].
pub fn build_context(
    trip: &Trip,
    preferences: Option<&TravelPreferences>,
    weather: Option<&[WeatherDay]>,
    config: &AnalysisConfig,
    clock: &impl Clock,
) -> Analysis {
    let now = clock.now();
    let mut warnings = Vec::new();

    let start = normalize_date(trip.start_date.as_ref(), "startDate", now, &mut warnings);
    let end = normalize_date(trip.end_date.as_ref(), "endDate", now, &mut warnings);
    let total_days = total_days(start, end);
    let traveler_count = trip.travelers.len().max(1);

    let detailed_itinerary: Vec<DayContext> = trip
        .itinerary
        .iter()
        .enumerate()
        .map(|(i, day)| analyze_day(day, i, traveler_count, weather, config, now, &mut warnings))
        .collect();

    let budget = analyze_budget(
        &trip.budget,
        aggregate_costs(&trip.itinerary, traveler_count),
        total_days,
        days_elapsed(start, now, total_days),
    );
    let progress = trip_progress(&detailed_itinerary, total_days, config);
    let stats = trip_stats(&detailed_itinerary);
    let issues = detect_issues(&detailed_itinerary, &budget);

    let destinations = if trip.destinations.is_empty() && !trip.destination.is_empty() {
        vec![trip.destination.clone()]
    } else {
        trip.destinations.clone()
    };

    tracing::debug!(
        trip_id = %trip.id,
        total_days,
        issues = issues.len(),
        warnings = warnings.len(),
        "built trip context"
    );

    let context = EnhancedTripContext {
        trip_id: trip.id.clone(),
        destination: trip.destination.clone(),
        destinations,
        dates: TripDates {
            start,
            end,
            formatted: format_date_range(start, end),
        },
        travelers: TravelerSummary {
            count: trip.travelers.len(),
            traveler_type: traveler_type(&trip.travelers),
        },
        detailed_itinerary,
        user_preferences: preferences.cloned(),
        budget,
        progress,
        weather_forecast: weather.map(<[WeatherDay]>::to_vec),
        current_destination: trip.destination_info.clone(),
        issues,
        stats,
    };

    Analysis { context, warnings }
}

/// Builds the context for a loaded snapshot.
pub fn analyze_snapshot(snapshot: &Snapshot, config: &AnalysisConfig, clock: &impl Clock) -> Analysis {
    build_context(
        &snapshot.trip,
        snapshot.preferences.as_ref(),
        snapshot.weather.as_deref(),
        config,
        clock,
    )
}
