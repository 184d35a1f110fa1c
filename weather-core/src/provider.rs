use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    Config,
    error::Result,
    model::{Coordinate, CurrentConditions, ForecastEntry, Location},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// The two capabilities the upstream weather provider offers.
///
/// Every call is a single request; failures carry the provider's own message.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name or a coordinate.
    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions>;

    /// Up to 5 days of 3-hour forecast steps, in provider order.
    async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<Vec<ForecastEntry>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.resolved_api_key()?;
    let provider = OpenWeatherProvider::new(
        api_key,
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    Ok(Arc::new(provider))
}
