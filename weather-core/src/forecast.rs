use std::ops::Deref;

use tracing::instrument;

use crate::{
    error::Result,
    model::{Coordinate, ForecastEntry},
    provider::WeatherProvider,
};

/// Raw 3-hour forecast steps for one coordinate, in provider order. Read-only once fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }
}

impl Deref for ForecastSeries {
    type Target = [ForecastEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

/// One forecast call per request; no retry, no pagination.
#[instrument(skip(provider))]
pub async fn fetch_forecast_series(
    provider: &dyn WeatherProvider,
    coordinate: Coordinate,
) -> Result<ForecastSeries> {
    provider.fetch_forecast(coordinate).await.map(ForecastSeries::new)
}
