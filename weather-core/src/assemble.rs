//! Reshapes the two real upstream feeds into the derived views clients ask for.
//!
//! Every function here is pure: given the fetched inputs (and a frozen "now" where relevant)
//! the output is deterministic.

use crate::{
    model::{ForecastEntry, WeatherPoint, round1},
    time::TimeNormalizer,
};

pub mod daily;
pub mod date_hourly;
pub mod extrapolate;
pub mod hourly;

pub use daily::{OUTLOOK_DAYS, daily_outlook};
pub use date_hourly::{DAY_HOURS, date_hourly};
pub use extrapolate::{CyclicDays, FabricationPolicy, HourlyJitter, LinearCooling, extrapolate, synthesize};
pub use hourly::{WINDOW_HOURS, hourly_window};

/// A forecast step as a published point in the target timezone.
pub(crate) fn forecast_point(entry: &ForecastEntry, normalizer: &TimeNormalizer) -> WeatherPoint {
    WeatherPoint {
        timestamp: normalizer.normalize(entry.timestamp),
        temperature: round1(entry.temperature),
        description: entry.description.clone(),
        humidity: None,
        wind_speed: None,
        icon: Some(entry.icon.clone()),
    }
}
