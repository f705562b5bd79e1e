//! Plain-text rendering of a trip context for an assistant prompt.

use std::fmt::Write;

use crate::output::{DayContext, DetailedActivity, EnhancedTripContext, TripIssue};
use crate::temporal::format_minutes;

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn destination_line(context: &EnhancedTripContext) -> String {
    if context.destinations.len() > 1 {
        context.destinations.join(", ")
    } else {
        context.destination.clone()
    }
}

fn activity_line(activity: &DetailedActivity) -> String {
    let mut line = format!(
        "{}-{} {}",
        format_minutes(activity.start_minute),
        format_minutes(activity.end_minute),
        activity.activity.name
    );
    if !activity.activity.activity_type.is_empty() {
        write!(line, " ({})", activity.activity.activity_type).unwrap();
    }
    if !activity.conflicts.is_empty() {
        write!(line, " [overlaps: {}]", activity.conflicts.join(", ")).unwrap();
    }
    if !activity.weather_suitable {
        line.push_str(" [weather risk]");
    }
    line
}

fn meals_line(day: &DayContext) -> String {
    let meals: Vec<&str> = [
        (day.has_breakfast, "breakfast"),
        (day.has_lunch, "lunch"),
        (day.has_dinner, "dinner"),
    ]
    .into_iter()
    .filter_map(|(has, meal)| has.then_some(meal))
    .collect();

    if meals.is_empty() {
        "none".to_string()
    } else {
        meals.join(", ")
    }
}

fn write_day(output: &mut String, day: &DayContext) {
    writeln!(output).unwrap();
    writeln!(output, "Day {} ({})", day.day_number, day.date.format("%a %b %-d")).unwrap();

    if day.activities.is_empty() {
        writeln!(output, "  (nothing planned)").unwrap();
    }
    for activity in &day.activities {
        writeln!(output, "  {}", activity_line(activity)).unwrap();
    }

    writeln!(output, "  Meals: {}", meals_line(day)).unwrap();

    if !day.free_time_slots.is_empty() {
        let slots: Vec<String> = day
            .free_time_slots
            .iter()
            .map(|s| format!("{}-{}", format_minutes(s.start), format_minutes(s.end)))
            .collect();
        writeln!(output, "  Free: {}", slots.join(", ")).unwrap();
    }

    if let Some(weather) = &day.weather {
        writeln!(
            output,
            "  Weather: {}, {:.0}\u{b0}, {:.0}% precipitation",
            weather.condition, weather.temperature, weather.precipitation
        )
        .unwrap();
    }
}

fn issue_line(issue: &TripIssue) -> String {
    let scope = issue
        .day
        .map_or_else(|| "Trip".to_string(), |d| format!("Day {d}"));
    format!("[{}] {scope}: {}", issue.severity, issue.message)
}

/// Renders the context as a compact briefing.
pub fn format_brief(context: &EnhancedTripContext) -> String {
    let mut output = String::new();
    let budget = &context.budget;
    let progress = &context.progress;

    // Header
    writeln!(output, "TRIP: {}", destination_line(context)).unwrap();
    let day_word = if progress.total_days == 1 { "day" } else { "days" };
    writeln!(
        output,
        "Dates: {} ({} {day_word})",
        context.dates.formatted, progress.total_days
    )
    .unwrap();
    writeln!(
        output,
        "Travelers: {} ({})",
        context.travelers.count, context.travelers.traveler_type
    )
    .unwrap();

    write!(
        output,
        "Budget: {:.2} of {:.2} {} planned, {:.2} left",
        budget.spent, budget.total, budget.currency, budget.remaining
    )
    .unwrap();
    if budget.is_over_budget {
        output.push_str(" (OVER BUDGET)");
    }
    writeln!(output).unwrap();

    writeln!(
        output,
        "Progress: {}/{} days planned, {:.1} activities/day, {:.0}% nights booked",
        progress.days_planned,
        progress.total_days,
        progress.activities_per_day,
        progress.accommodation_coverage
    )
    .unwrap();
    if !progress.empty_days.is_empty() {
        writeln!(output, "Empty days: {}", join_numbers(&progress.empty_days)).unwrap();
    }
    if !progress.packed_days.is_empty() {
        writeln!(output, "Packed days: {}", join_numbers(&progress.packed_days)).unwrap();
    }

    for day in &context.detailed_itinerary {
        write_day(&mut output, day);
    }

    writeln!(output).unwrap();
    writeln!(output, "Issues:").unwrap();
    if context.issues.is_empty() {
        writeln!(output, "  none").unwrap();
    }
    for issue in &context.issues {
        writeln!(output, "  - {}", issue_line(issue)).unwrap();
    }

    output
}
