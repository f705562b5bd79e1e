//! Output data model: the enriched trip context.
//!
//! Everything here is created fresh by each analysis and serializes to the
//! camelCase JSON the assistant and UI consume.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::kinds::{IssueType, Severity, TravelerType};
use crate::model::{
    Accommodation, Activity, CategoryBreakdown, DestinationInfo, Transport, TravelPreferences,
    WeatherDay,
};
use crate::temporal::{NormalizationWarning, format_minutes};

/// An unscheduled stretch of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    /// Minutes since midnight.
    pub start: u32,
    /// Minutes since midnight.
    pub end: u32,
}

impl TimeSlot {
    pub const fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("TimeSlot", 3)?;
        state.serialize_field("start", &format_minutes(self.start))?;
        state.serialize_field("end", &format_minutes(self.end))?;
        state.serialize_field("duration", &self.duration())?;
        state.end()
    }
}

/// An activity with its schedule analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedActivity {
    #[serde(flatten)]
    pub activity: Activity,

    pub day_number: u32,

    /// Normalized start, minutes since midnight.
    pub start_minute: u32,

    /// Start plus duration. May run past midnight.
    pub end_minute: u32,

    /// Names of same-day activities whose time overlaps this one.
    pub conflicts: Vec<String>,

    pub weather_suitable: bool,
}

impl DetailedActivity {
    /// Scheduled length in minutes.
    pub const fn duration(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

/// A day with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayContext {
    pub day_number: u32,

    pub date: DateTime<Utc>,

    /// Sorted by start time.
    pub activities: Vec<DetailedActivity>,

    pub accommodations: Vec<Accommodation>,

    pub transportation: Vec<Transport>,

    pub free_time_slots: Vec<TimeSlot>,

    pub has_breakfast: bool,

    pub has_lunch: bool,

    pub has_dinner: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherDay>,

    /// Activities, stays and transfers of this day, with per-person costs
    /// multiplied out.
    pub total_cost: f64,
}

/// Budget figures derived from the itinerary's costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    pub total: f64,

    pub currency: String,

    pub spent: f64,

    /// `total - spent`; negative when over budget.
    pub remaining: f64,

    pub daily_average: f64,

    pub remaining_daily: f64,

    pub by_category: CategoryBreakdown,

    pub is_over_budget: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_overage: Option<f64>,
}

/// How complete the plan is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripProgress {
    pub total_days: u32,

    pub days_planned: u32,

    pub activities_per_day: f64,

    /// Percentage of days with at least one accommodation entry.
    pub accommodation_coverage: f64,

    pub empty_days: Vec<u32>,

    pub packed_days: Vec<u32>,
}

/// A defect found in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,

    pub severity: Severity,

    /// Day number, for day-scoped issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,

    pub message: String,

    pub suggestion: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_activities: Option<Vec<String>>,
}

/// Descriptive counts over the whole itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripStats {
    pub total_activities: usize,

    pub photo_spots: usize,

    pub restaurants: usize,

    /// Hours of free time across all days, rounded.
    pub free_time: u32,

    /// Not computed; distance lookups are external.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,

    /// Not computed; routing is external.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDates {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// e.g. `Mar 5 – Mar 9, 2025`.
    pub formatted: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerSummary {
    pub count: usize,
    #[serde(rename = "type")]
    pub traveler_type: TravelerType,
}

/// The enriched trip context handed to the assistant and the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedTripContext {
    pub trip_id: String,

    pub destination: String,

    pub destinations: Vec<String>,

    pub dates: TripDates,

    pub travelers: TravelerSummary,

    pub detailed_itinerary: Vec<DayContext>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<TravelPreferences>,

    pub budget: BudgetAnalysis,

    pub progress: TripProgress,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_forecast: Option<Vec<WeatherDay>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_destination: Option<DestinationInfo>,

    pub issues: Vec<TripIssue>,

    pub stats: TripStats,
}

/// Result of an analysis: the context plus every fallback taken on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub context: EnhancedTripContext,

    /// Empty when the input was fully well-formed.
    pub warnings: Vec<NormalizationWarning>,
}
