//! Cost aggregation and budget analysis.
//!
//! Activity costs flagged per-person are multiplied by the party size. Stays
//! and transfers are taken at face value since they are already priced for
//! the whole trip.

use chrono::{DateTime, Utc};

use crate::model::{Activity, Budget, CategoryBreakdown, Cost, Day};
use crate::output::BudgetAnalysis;
use crate::temporal::days_between;

/// Cost an activity contributes, given the party size.
#[allow(clippy::cast_precision_loss)]
pub fn activity_cost(activity: &Activity, traveler_count: usize) -> f64 {
    activity.cost.as_ref().map_or(0.0, |cost| {
        if cost.per_person {
            cost.amount * traveler_count as f64
        } else {
            cost.amount
        }
    })
}

fn face_value(cost: Option<&Cost>) -> f64 {
    cost.map_or(0.0, |c| c.amount)
}

/// Adds one day's costs into `breakdown`.
fn add_day(breakdown: &mut CategoryBreakdown, day: &Day, traveler_count: usize) {
    for activity in &day.activities {
        let amount = activity_cost(activity, traveler_count);
        if activity.is_type("dining") {
            breakdown.food += amount;
        } else {
            breakdown.activities += amount;
        }
    }
    for stay in day.accommodations.iter().flatten() {
        breakdown.accommodation += face_value(stay.cost.as_ref());
    }
    for transfer in day.transportation.iter().flatten() {
        breakdown.transport += face_value(transfer.cost.as_ref());
    }
}

/// Sums every cost in the itinerary by category.
///
/// `shopping` and `other` are never populated.
pub fn aggregate_costs(days: &[Day], traveler_count: usize) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for day in days {
        add_day(&mut breakdown, day, traveler_count);
    }
    breakdown
}

/// Total cost of a single day.
pub fn day_cost(day: &Day, traveler_count: usize) -> f64 {
    let mut breakdown = CategoryBreakdown::default();
    add_day(&mut breakdown, day, traveler_count);
    breakdown.total()
}

/// Whole days of the trip already behind us, in `0..=total_days`.
pub fn days_elapsed(trip_start: DateTime<Utc>, now: DateTime<Utc>, total_days: u32) -> u32 {
    let elapsed = days_between(trip_start, now).clamp(0, i64::from(total_days));
    u32::try_from(elapsed).unwrap_or(total_days)
}

/// Derives budget figures from the aggregated costs.
///
/// `total_days` must be at least 1.
pub fn analyze_budget(
    budget: &Budget,
    by_category: CategoryBreakdown,
    total_days: u32,
    days_elapsed: u32,
) -> BudgetAnalysis {
    let spent = by_category.total();
    let remaining = budget.total - spent;
    let is_over_budget = spent > budget.total;
    let days_remaining = total_days.saturating_sub(days_elapsed).max(1);

    tracing::debug!(
        total = budget.total,
        spent,
        remaining,
        days_remaining,
        "analyzed budget"
    );

    BudgetAnalysis {
        total: budget.total,
        currency: budget.currency.clone(),
        spent,
        remaining,
        daily_average: budget.total / f64::from(total_days.max(1)),
        remaining_daily: remaining / f64::from(days_remaining),
        by_category,
        is_over_budget,
        projected_overage: is_over_budget.then(|| spent - budget.total),
    }
}
