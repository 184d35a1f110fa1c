use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    model::{DailyPoint, ForecastEntry, round1},
};

use super::extrapolate::{CyclicDays, extrapolate};

/// Length of the daily outlook.
pub const OUTLOOK_DAYS: usize = 30;

/// How many leading real days are replayed to fill the outlook.
pub const REPLAY_PERIOD: usize = 5;

/// One point per provider calendar day, then cyclic replay up to [`OUTLOOK_DAYS`].
pub fn daily_outlook(series: &[ForecastEntry]) -> Result<Vec<DailyPoint>> {
    let real = first_of_day(series);
    if real.is_empty() {
        return Err(WeatherError::DegenerateUpstreamData(
            "forecast contained no entries".to_string(),
        ));
    }

    debug!(real_days = real.len(), "Extending daily outlook");
    extrapolate(real, OUTLOOK_DAYS, &CyclicDays::new(REPLAY_PERIOD))
}

/// The first entry seen for each date wins; later same-day entries are ignored.
pub fn first_of_day(series: &[ForecastEntry]) -> Vec<DailyPoint> {
    let mut days: Vec<DailyPoint> = Vec::new();

    for entry in series {
        let date = entry.provider_date();
        if days.iter().any(|d| d.date == date) {
            continue;
        }

        days.push(DailyPoint {
            date,
            temperature: round1(entry.temperature),
            description: entry.description.clone(),
        });

        if days.len() >= OUTLOOK_DAYS {
            break;
        }
    }

    days
}
