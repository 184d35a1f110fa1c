//! Request-level composition of resolver, fetchers and assemblers.
//!
//! Upstream calls within one request are issued strictly in sequence. No state survives a call.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::{
    assemble::{daily_outlook, date_hourly, hourly_window},
    error::{Result, WeatherError},
    forecast::fetch_forecast_series,
    model::{CurrentReport, DailyPoint, Location, WeatherPoint},
    provider::WeatherProvider,
    resolver::resolve_coordinates,
    time::{Clock, SystemClock, TimeNormalizer, parse_date},
};

#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    normalizer: TimeNormalizer,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, normalizer: TimeNormalizer) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock), normalizer)
    }

    pub fn with_clock(
        provider: Arc<dyn WeatherProvider>,
        clock: Arc<dyn Clock>,
        normalizer: TimeNormalizer,
    ) -> Self {
        Self { provider, clock, normalizer }
    }

    pub fn normalizer(&self) -> &TimeNormalizer {
        &self.normalizer
    }

    /// Current conditions for `city`, provider errors passed through verbatim.
    #[instrument(skip(self))]
    pub async fn current(&self, city: Option<&str>) -> Result<CurrentReport> {
        let city = require("city", city)?;
        let current = self.provider.fetch_current(&Location::City(city.to_string())).await?;
        Ok(CurrentReport::from(current))
    }

    /// The 30-day outlook: real forecast days followed by replayed ones.
    #[instrument(skip(self))]
    pub async fn outlook(&self, city: Option<&str>) -> Result<Vec<DailyPoint>> {
        let city = require("city", city)?;
        let coordinate = resolve_coordinates(self.provider.as_ref(), city).await?;
        let series = fetch_forecast_series(self.provider.as_ref(), coordinate).await?;

        let outlook = daily_outlook(&series)?;
        info!(days = outlook.len(), "Built daily outlook");
        Ok(outlook)
    }

    /// The 24-hour window centred on the aligned current time.
    #[instrument(skip(self))]
    pub async fn hourly(&self, city: Option<&str>) -> Result<Vec<WeatherPoint>> {
        let city = require("city", city)?;
        let coordinate = resolve_coordinates(self.provider.as_ref(), city).await?;
        let now = self.normalizer.aligned_now(self.clock.as_ref());

        let series = fetch_forecast_series(self.provider.as_ref(), coordinate).await?;
        let current = self.provider.fetch_current(&Location::Coordinate(coordinate)).await?;

        let window = hourly_window(&series, &current, now, &self.normalizer)?;
        info!(points = window.len(), "Built hourly window");
        Ok(window)
    }

    /// Hour-by-hour breakdown of `date` (`YYYY-MM-DD`).
    #[instrument(skip(self))]
    pub async fn hourly_for_date(
        &self,
        city: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<WeatherPoint>> {
        let city = require("city", city)?;
        let date: NaiveDate = parse_date(require("date", date)?)?;
        let coordinate = resolve_coordinates(self.provider.as_ref(), city).await?;
        let series = fetch_forecast_series(self.provider.as_ref(), coordinate).await?;

        let points = date_hourly(&series, date, &self.normalizer)?;
        info!(%date, points = points.len(), "Built hourly breakdown");
        Ok(points)
    }
}

fn require<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(WeatherError::MissingParameter(name))
}
