//! Weather suitability of outdoor activities.

use crate::config::AnalysisConfig;
use crate::model::{Activity, WeatherDay};

/// Activity types that happen outside.
const OUTDOOR_TYPES: &[&str] = &["outdoor", "nature", "beach", "hiking", "sightseeing"];

/// Returns true if the activity's type is an outdoor one.
pub fn is_outdoor(activity: &Activity) -> bool {
    OUTDOOR_TYPES.iter().any(|t| activity.is_type(t))
}

/// Returns true if the forecast rules out outdoor plans.
pub fn is_adverse(weather: &WeatherDay, config: &AnalysisConfig) -> bool {
    weather.precipitation > config.max_precipitation
        || weather.wind_speed > config.max_wind_speed
        || weather.condition.to_lowercase().contains("storm")
}

/// Looks up the forecast for a 1-based day number.
pub fn forecast_for_day(weather: Option<&[WeatherDay]>, day_number: u32) -> Option<&WeatherDay> {
    let index = usize::try_from(day_number.checked_sub(1)?).ok()?;
    weather?.get(index)
}

/// Returns false only for outdoor activities on days with adverse weather.
///
/// Without a forecast, every activity is suitable.
pub fn is_suitable(activity: &Activity, forecast: Option<&WeatherDay>, config: &AnalysisConfig) -> bool {
    if !is_outdoor(activity) {
        return true;
    }
    forecast.is_none_or(|w| !is_adverse(w, config))
}
