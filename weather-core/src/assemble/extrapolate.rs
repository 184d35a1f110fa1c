//! Fabrication of points the provider cannot supply.
//!
//! Each policy builds one point at a time from a template set and the series produced so far.
//! These formulas are placeholders: there is no historical or long-range source behind them.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::{
    error::{Result, WeatherError},
    model::{DailyPoint, WeatherPoint, round1},
    time::TimeNormalizer,
};

pub trait FabricationPolicy<T> {
    /// Build the point that follows `produced`. `templates` is never empty.
    fn fabricate(&self, templates: &[T], produced: &[T]) -> Result<T>;
}

/// Keep `real` (cut to `target_len`) and pad it with fabricated points up to `target_len`.
pub fn extrapolate<T, P>(mut real: Vec<T>, target_len: usize, policy: &P) -> Result<Vec<T>>
where
    T: Clone,
    P: FabricationPolicy<T>,
{
    real.truncate(target_len);
    if real.len() == target_len {
        return Ok(real);
    }
    if real.is_empty() {
        return Err(WeatherError::DegenerateUpstreamData(
            "no real points to extrapolate from".to_string(),
        ));
    }

    let templates = real.clone();
    while real.len() < target_len {
        let next = policy.fabricate(&templates, &real)?;
        real.push(next);
    }
    Ok(real)
}

/// Build `len` purely fabricated points from `templates`.
pub fn synthesize<T, P>(templates: &[T], len: usize, policy: &P) -> Result<Vec<T>>
where
    P: FabricationPolicy<T>,
{
    if templates.is_empty() && len > 0 {
        return Err(WeatherError::DegenerateUpstreamData(
            "no template points to synthesize from".to_string(),
        ));
    }

    let mut produced = Vec::with_capacity(len);
    while produced.len() < len {
        let next = policy.fabricate(templates, &produced)?;
        produced.push(next);
    }
    Ok(produced)
}

/// Replays the first `period` real days in order, each copy dated the day after the last point.
#[derive(Debug, Clone, Copy)]
pub struct CyclicDays {
    period: usize,
}

impl CyclicDays {
    pub fn new(period: usize) -> Self {
        Self { period: period.max(1) }
    }
}

impl FabricationPolicy<DailyPoint> for CyclicDays {
    fn fabricate(&self, templates: &[DailyPoint], produced: &[DailyPoint]) -> Result<DailyPoint> {
        let cycle = self.period.min(templates.len());
        let offset = produced.len().saturating_sub(templates.len());
        let source = &templates[offset % cycle];

        let date = produced
            .last()
            .map_or(Some(source.date), |last| last.date.succ_opt())
            .ok_or_else(|| {
                WeatherError::DegenerateUpstreamData("outlook date overflowed the calendar".to_string())
            })?;

        Ok(DailyPoint { date, ..source.clone() })
    }
}

/// Fills the hours before `now` with the template, cooled by `step` °C per hour of distance.
///
/// Point `i` of `hours` sits `hours - i` hours before `now`.
#[derive(Debug, Clone, Copy)]
pub struct LinearCooling {
    now: DateTime<Tz>,
    hours: i64,
    step: f64,
}

impl LinearCooling {
    pub const STEP: f64 = 0.2;

    pub fn new(now: DateTime<Tz>, hours: i64) -> Self {
        Self { now, hours, step: Self::STEP }
    }
}

impl FabricationPolicy<WeatherPoint> for LinearCooling {
    fn fabricate(&self, templates: &[WeatherPoint], produced: &[WeatherPoint]) -> Result<WeatherPoint> {
        let template = &templates[0];
        let hours_before = self.hours - produced.len() as i64;

        Ok(WeatherPoint {
            timestamp: self.now - Duration::hours(hours_before),
            temperature: round1(template.temperature - self.step * hours_before as f64),
            ..template.clone()
        })
    }
}

/// One point per hour of `date`, cycling the templates and oscillating by ±`amplitude` °C.
///
/// Points are spaced by absolute hours from the date's local midnight, so timestamps strictly
/// increase even across a DST change. On a 23-hour day the last point falls on the next day's
/// midnight; on a 25-hour day the repeated wall-clock hour appears twice with distinct offsets.
#[derive(Debug, Clone, Copy)]
pub struct HourlyJitter {
    midnight: DateTime<Tz>,
    amplitude: f64,
}

impl HourlyJitter {
    pub const AMPLITUDE: f64 = 0.5;

    pub fn new(date: NaiveDate, normalizer: &TimeNormalizer) -> Result<Self> {
        Ok(Self { midnight: normalizer.hour_of(date, 0)?, amplitude: Self::AMPLITUDE })
    }

    /// -1, 0, +1, -1, ... for hours 0, 1, 2, 3, ...
    pub fn phase(hour: usize) -> f64 {
        (hour % 3) as f64 - 1.0
    }
}

impl FabricationPolicy<WeatherPoint> for HourlyJitter {
    fn fabricate(&self, templates: &[WeatherPoint], produced: &[WeatherPoint]) -> Result<WeatherPoint> {
        let hour = produced.len();
        let template = &templates[hour % templates.len()];

        Ok(WeatherPoint {
            timestamp: self.midnight + Duration::hours(hour as i64),
            temperature: round1(template.temperature + Self::phase(hour) * self.amplitude),
            ..template.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;

    fn day(date: &str, temperature: f64) -> DailyPoint {
        DailyPoint {
            date: date.parse().unwrap(),
            temperature,
            description: format!("day {date}"),
        }
    }

    fn point(temperature: f64) -> WeatherPoint {
        WeatherPoint {
            timestamp: Kolkata.with_ymd_and_hms(2024, 1, 1, 5, 30, 0).unwrap(),
            temperature,
            description: "haze".to_string(),
            humidity: None,
            wind_speed: None,
            icon: Some("50d".to_string()),
        }
    }

    #[test]
    fn extrapolate_requires_real_points() {
        let err = extrapolate(Vec::<DailyPoint>::new(), 30, &CyclicDays::new(5)).unwrap_err();
        assert!(matches!(err, WeatherError::DegenerateUpstreamData(_)));
    }

    #[test]
    fn extrapolate_truncates_when_real_is_long_enough() {
        let real = vec![day("2024-01-01", 1.0), day("2024-01-02", 2.0), day("2024-01-03", 3.0)];
        let out = extrapolate(real, 2, &CyclicDays::new(5)).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn cyclic_days_with_fewer_than_period_cycles_real_count() {
        let real = vec![day("2024-01-01", 1.0), day("2024-01-02", 2.0), day("2024-01-03", 3.0)];
        let out = extrapolate(real, 8, &CyclicDays::new(5)).unwrap();

        let temps: Vec<f64> = out.iter().map(|d| d.temperature).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0]);
        assert_eq!(out[7].date, "2024-01-08".parse::<NaiveDate>().unwrap());
        assert_eq!(out[3].description, "day 2024-01-01");
    }

    #[test]
    fn cyclic_days_replays_only_first_period_days() {
        let real: Vec<DailyPoint> = (1..=6)
            .map(|d| day(&format!("2024-01-0{d}"), f64::from(d)))
            .collect();
        let out = extrapolate(real, 12, &CyclicDays::new(5)).unwrap();

        let replayed: Vec<f64> = out[6..].iter().map(|d| d.temperature).collect();
        assert_eq!(replayed, vec![1.0, 2.0, 3.0, 4.0, 5.0, 1.0]);
    }

    #[test]
    fn synthesize_rejects_empty_templates() {
        let now = Kolkata.with_ymd_and_hms(2024, 1, 1, 12, 59, 0).unwrap();
        let empty: [WeatherPoint; 0] = [];
        let err = synthesize(&empty, 12, &LinearCooling::new(now, 12)).unwrap_err();
        assert!(matches!(err, WeatherError::DegenerateUpstreamData(_)));
    }

    #[test]
    fn linear_cooling_walks_up_to_now() {
        let now = Kolkata.with_ymd_and_hms(2024, 1, 1, 12, 59, 0).unwrap();
        let out = synthesize(&[point(20.0)], 12, &LinearCooling::new(now, 12)).unwrap();

        assert_eq!(out[0].timestamp, now - Duration::hours(12));
        assert_eq!(out[11].timestamp, now - Duration::hours(1));
        assert_eq!(out[0].temperature, 17.6);
        assert_eq!(out[11].temperature, 19.8);
        assert!(out.iter().all(|p| p.icon.as_deref() == Some("50d")));
    }

    #[test]
    fn hourly_jitter_oscillates_around_templates() {
        let date: NaiveDate = "2024-02-10".parse().unwrap();
        let templates = [point(10.0), point(20.0)];
        let jitter = HourlyJitter::new(date, &TimeNormalizer::new(Kolkata)).unwrap();
        let out = synthesize(&templates, 6, &jitter).unwrap();

        let temps: Vec<f64> = out.iter().map(|p| p.temperature).collect();
        assert_eq!(temps, vec![9.5, 20.0, 10.5, 19.5, 10.0, 20.5]);
        assert_eq!(out[3].timestamp, Kolkata.with_ymd_and_hms(2024, 2, 10, 3, 0, 0).unwrap());
    }
}
