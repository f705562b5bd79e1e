//! Itinerary analysis engine for the trip planner.
//!
//! Turns one trip snapshot into an enriched context:
//! - Normalization: reconciling the store's timestamp shapes
//! - Scheduling: overlaps, free time and meal coverage per day
//! - Budget: per-person cost aggregation and burn-rate figures
//! - Issues: prioritized plan defects
//!
//! Analysis is pure and never fails. Fallbacks taken for malformed input are
//! reported as [`NormalizationWarning`]s next to the context.

pub mod brief;
pub mod budget;
pub mod clock;
pub mod config;
mod context;
pub mod issues;
pub mod kinds;
mod lenient;
pub mod meals;
pub mod model;
pub mod output;
pub mod progress;
pub mod schedule;
pub mod temporal;
pub mod weather;

pub use brief::format_brief;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AnalysisConfig;
pub use context::{analyze_snapshot, build_context, traveler_type};
pub use kinds::{IssueType, Severity, TravelerType, UnknownKind};
pub use model::{Snapshot, SnapshotError, TravelPreferences, Trip, WeatherDay};
pub use output::{Analysis, EnhancedTripContext, TripIssue};
pub use temporal::{NormalizationWarning, Timestamp, WarningReason};
