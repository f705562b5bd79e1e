//! Analysis thresholds.

use serde::{Deserialize, Serialize};

/// Configuration for itinerary analysis.
///
/// All times are minutes since midnight; all durations are minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Start of the daily planning window. Default: 480 (08:00).
    pub window_start_minute: u32,

    /// End of the daily planning window. Default: 1320 (22:00).
    pub window_end_minute: u32,

    /// Free slots shorter than this are dropped. Default: 30.
    pub min_free_slot_minutes: u32,

    /// A gap between consecutive activities must exceed this to produce a
    /// free slot. Default: 30.
    pub gap_threshold_minutes: u32,

    /// Duration assumed for activities without one. Default: 60.
    pub default_duration_minutes: u32,

    /// Days with more activities than this are packed. Default: 5.
    pub packed_day_threshold: usize,

    /// Precipitation percentage above which outdoor plans are unsuitable.
    /// Default: 70.
    pub max_precipitation: f64,

    /// Wind speed above which outdoor plans are unsuitable. Same unit as the
    /// forecast. Default: 50.
    pub max_wind_speed: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_start_minute: 8 * 60,  // 08:00
            window_end_minute: 22 * 60,   // 22:00
            min_free_slot_minutes: 30,
            gap_threshold_minutes: 30,
            default_duration_minutes: 60,
            packed_day_threshold: 5,
            max_precipitation: 70.0,
            max_wind_speed: 50.0,
        }
    }
}
