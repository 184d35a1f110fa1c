use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    error::{Result, WeatherError},
    model::{ForecastEntry, WeatherPoint},
    time::TimeNormalizer,
};

use super::{
    extrapolate::{HourlyJitter, synthesize},
    forecast_point,
};

/// Points fabricated for a date outside the forecast horizon.
pub const DAY_HOURS: usize = 24;

/// The hour-by-hour view of `date` in the target timezone.
///
/// Inside the forecast horizon every real step on that date is returned untouched. Outside it,
/// the last forecast day is replayed over 24 consecutive hours from local midnight with a small
/// oscillating jitter.
pub fn date_hourly(
    series: &[ForecastEntry],
    date: NaiveDate,
    normalizer: &TimeNormalizer,
) -> Result<Vec<WeatherPoint>> {
    let points: Vec<WeatherPoint> = series.iter().map(|e| forecast_point(e, normalizer)).collect();

    let mut real: Vec<WeatherPoint> =
        points.iter().filter(|p| p.timestamp.date_naive() == date).cloned().collect();
    if !real.is_empty() {
        debug!(%date, points = real.len(), "Date is inside the forecast horizon");
        real.sort_by_key(|p| p.timestamp);
        return Ok(real);
    }

    let last_day = points
        .iter()
        .map(|p| p.timestamp.date_naive())
        .max()
        .ok_or_else(|| WeatherError::DegenerateUpstreamData("forecast contained no entries".to_string()))?;
    let templates: Vec<WeatherPoint> =
        points.into_iter().filter(|p| p.timestamp.date_naive() == last_day).collect();

    warn!(%date, %last_day, templates = templates.len(), "Date is outside the forecast horizon, fabricating");
    let mut fabricated = synthesize(&templates, DAY_HOURS, &HourlyJitter::new(date, normalizer)?)?;
    fabricated.sort_by_key(|p| p.timestamp);
    Ok(fabricated)
}
