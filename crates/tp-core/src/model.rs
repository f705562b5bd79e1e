//! Input data model, as written by the trip store.
//!
//! Every field the store might omit is optional or defaults to empty so that
//! any structurally valid document decodes. Semantic validation happens in the
//! analysis, which degrades instead of rejecting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lenient;
use crate::temporal::Timestamp;

/// A trip with its day-by-day itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trip {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,

    /// Primary destination name.
    #[serde(deserialize_with = "lenient::or_default")]
    pub destination: String,

    /// All destinations for multi-stop trips.
    #[serde(deserialize_with = "lenient::or_default")]
    pub destinations: Vec<String>,

    pub start_date: Option<Timestamp>,

    pub end_date: Option<Timestamp>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub travelers: Vec<Traveler>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub budget: Budget,

    #[serde(deserialize_with = "lenient::or_default")]
    pub itinerary: Vec<Day>,

    /// Destination facts supplied by an external lookup. Passed through.
    #[serde(deserialize_with = "lenient::or_default")]
    pub destination_info: Option<DestinationInfo>,
}

/// A member of the travel party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Traveler {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,

    /// Relationship tag, e.g. "partner", "family", "friend".
    #[serde(deserialize_with = "lenient::or_default")]
    pub relationship: Option<String>,
}

/// The trip budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Budget {
    #[serde(deserialize_with = "lenient::number")]
    pub total: f64,

    #[serde(deserialize_with = "lenient::or_default")]
    pub currency: String,

    /// Planned split per category, if the user entered one.
    #[serde(deserialize_with = "lenient::or_default")]
    pub breakdown: Option<CategoryBreakdown>,
}

/// Amounts per spending category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryBreakdown {
    #[serde(deserialize_with = "lenient::number")]
    pub accommodation: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub transport: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub food: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub activities: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub shopping: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub other: f64,
}

impl CategoryBreakdown {
    /// Sum of all categories.
    pub fn total(&self) -> f64 {
        self.accommodation + self.transport + self.food + self.activities + self.shopping + self.other
    }
}

/// One calendar day of the itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Day {
    /// 1-based position in the trip.
    #[serde(deserialize_with = "lenient::whole")]
    pub day_number: u32,

    pub date: Option<Timestamp>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub activities: Vec<Activity>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub accommodations: Option<Vec<Accommodation>>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub transportation: Option<Vec<Transport>>,
}

impl Day {
    /// Number of accommodation entries (absent counts as none).
    pub fn accommodation_count(&self) -> usize {
        self.accommodations.as_ref().map_or(0, Vec::len)
    }
}

/// A scheduled activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,

    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,

    /// Free-form category tag, e.g. "dining", "sightseeing", "hiking".
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub activity_type: String,

    /// `HH:MM` string or any date-like value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,

    /// Duration in minutes.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_whole")]
    pub duration: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub cost: Option<Cost>,

    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::or_default")]
    pub tags: Vec<String>,

    /// Free-form place description. Passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<serde_json::Value>,
}

impl Activity {
    /// Case-insensitive type comparison.
    pub fn is_type(&self, activity_type: &str) -> bool {
        self.activity_type.eq_ignore_ascii_case(activity_type)
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A price attached to an activity, stay or transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cost {
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,

    #[serde(deserialize_with = "lenient::or_default")]
    pub currency: String,

    /// The amount is charged once per traveler.
    #[serde(deserialize_with = "lenient::or_default")]
    pub per_person: bool,
}

/// A place to stay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Accommodation {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub id: Option<String>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub cost: Option<Cost>,
}

/// A transfer between places.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transport {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub id: Option<String>,

    /// e.g. "flight", "train", "car".
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub cost: Option<Cost>,
}

/// Forecast for one trip day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherDay {
    #[serde(deserialize_with = "lenient::number")]
    pub temperature: f64,

    /// Chance of precipitation, in percent.
    #[serde(deserialize_with = "lenient::number")]
    pub precipitation: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub wind_speed: f64,

    #[serde(deserialize_with = "lenient::or_default")]
    pub condition: String,
}

/// Traveler preferences. Not analyzed, only handed on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelPreferences {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub travel_style: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::or_default")]
    pub interests: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Facts about the destination currently being visited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationInfo {
    #[serde(deserialize_with = "lenient::or_default")]
    pub timezone: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub currency: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(deserialize_with = "lenient::number")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub lng: f64,
}

/// Errors loading a snapshot document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not JSON or does not have the snapshot's structure.
    #[error("invalid snapshot document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the analysis reads: a trip plus optional companions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(deserialize_with = "lenient::or_default")]
    pub trip: Trip,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub preferences: Option<TravelPreferences>,

    /// Index-aligned to day number minus one.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub weather: Option<Vec<WeatherDay>>,
}

impl Snapshot {
    /// Decodes a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
