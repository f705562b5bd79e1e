//! Plan defect detection.
//!
//! Days are scanned in itinerary order. Within a day the rules fire in
//! precedence order (time conflicts, missing lunch, missing accommodation);
//! the trip-level budget rule runs last. Nothing is deduplicated: one root
//! cause may surface as several issues.

use crate::kinds::{IssueType, Severity};
use crate::output::{BudgetAnalysis, DayContext, TripIssue};

fn time_conflicts(day: &DayContext) -> impl Iterator<Item = TripIssue> + '_ {
    day.activities
        .iter()
        .filter(|a| !a.conflicts.is_empty())
        .map(move |a| {
            let mut affected = vec![a.activity.name.clone()];
            affected.extend(a.conflicts.iter().cloned());
            TripIssue {
                issue_type: IssueType::TimeConflict,
                severity: Severity::High,
                day: Some(day.day_number),
                message: format!(
                    "\"{}\" overlaps with {}",
                    a.activity.name,
                    quoted_list(&a.conflicts)
                ),
                suggestion: "Move one of the activities or shorten its duration".to_string(),
                affected_activities: Some(affected),
            }
        })
}

/// Only lunch is checked; breakfast and dinner gaps are not flagged.
fn meal_gap(day: &DayContext) -> Option<TripIssue> {
    (!day.activities.is_empty() && !day.has_lunch).then(|| TripIssue {
        issue_type: IssueType::MealGap,
        severity: Severity::Medium,
        day: Some(day.day_number),
        message: format!("No lunch planned on day {}", day.day_number),
        suggestion: "Add a lunch stop between 11:00 and 15:00".to_string(),
        affected_activities: None,
    })
}

fn no_accommodation(day: &DayContext) -> Option<TripIssue> {
    day.accommodations.is_empty().then(|| TripIssue {
        issue_type: IssueType::NoAccommodation,
        severity: Severity::High,
        day: Some(day.day_number),
        message: format!("No accommodation booked for day {}", day.day_number),
        suggestion: "Book a place to stay for this night".to_string(),
        affected_activities: None,
    })
}

fn budget_overrun(budget: &BudgetAnalysis) -> Option<TripIssue> {
    let overage = budget.projected_overage?;
    budget.is_over_budget.then(|| TripIssue {
        issue_type: IssueType::BudgetOverrun,
        severity: Severity::High,
        day: None,
        message: format!(
            "Planned costs exceed the budget by {overage:.2} {}",
            budget.currency
        ),
        suggestion: "Drop or swap some paid activities, or raise the budget".to_string(),
        affected_activities: None,
    })
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scans the analyzed itinerary for defects.
pub fn detect_issues(days: &[DayContext], budget: &BudgetAnalysis) -> Vec<TripIssue> {
    let mut issues = Vec::new();

    for day in days {
        issues.extend(time_conflicts(day));
        issues.extend(meal_gap(day));
        issues.extend(no_accommodation(day));
    }
    issues.extend(budget_overrun(budget));

    tracing::debug!(count = issues.len(), "detected issues");
    issues
}
