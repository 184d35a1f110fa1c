use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use tracing::debug;

use crate::{
    error::Result,
    model::{CurrentConditions, ForecastEntry, WeatherPoint, round1},
    time::TimeNormalizer,
};

use super::{
    extrapolate::{LinearCooling, synthesize},
    forecast_point,
};

/// Hours covered on each side of "now".
pub const WINDOW_HOURS: i64 = 12;

const MAX_POINTS: usize = 2 * WINDOW_HOURS as usize;

/// The 24-hour view centred on the aligned `now`.
///
/// One point for `now` from current conditions, twelve fabricated past hours, and up to twelve
/// forecast steps after `now`, sorted ascending and capped at 24.
pub fn hourly_window(
    series: &[ForecastEntry],
    current: &CurrentConditions,
    now: DateTime<Tz>,
    normalizer: &TimeNormalizer,
) -> Result<Vec<WeatherPoint>> {
    let span = Duration::hours(WINDOW_HOURS);
    let window: Vec<WeatherPoint> = series
        .iter()
        .map(|entry| forecast_point(entry, normalizer))
        .filter(|p| p.timestamp >= now - span && p.timestamp <= now + span)
        .collect();

    let current_point = WeatherPoint {
        timestamp: now,
        temperature: round1(current.temperature),
        description: current.description.clone(),
        humidity: Some(current.humidity),
        wind_speed: Some(round1(current.wind_speed)),
        icon: Some(current.icon.clone()),
    };

    let template = window.first().unwrap_or(&current_point).clone();
    let past = synthesize(
        std::slice::from_ref(&template),
        WINDOW_HOURS as usize,
        &LinearCooling::new(now, WINDOW_HOURS),
    )?;

    let future = window
        .into_iter()
        .filter(|p| p.timestamp > now && p.timestamp <= now + span)
        .take(WINDOW_HOURS as usize);

    let mut points = vec![current_point];
    points.extend(past);
    points.extend(future);
    points.sort_by_key(|p| p.timestamp);
    points.truncate(MAX_POINTS);

    debug!(points = points.len(), "Assembled hourly window");
    Ok(points)
}
