//! City name to coordinate resolution.
//!
//! The forecast endpoint is addressed by coordinate only, so names are resolved through the
//! current-conditions endpoint instead of a separate geocoder. Any answer from the provider that
//! is not a coordinate means the city is unknown; a provider that never answered is reported as
//! such.

use tracing::{debug, instrument, warn};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinate, Location},
    provider::WeatherProvider,
};

#[instrument(skip(provider))]
pub async fn resolve_coordinates(provider: &dyn WeatherProvider, city: &str) -> Result<Coordinate> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::MissingParameter("city"));
    }

    match provider.fetch_current(&Location::City(city.to_string())).await {
        Ok(current) => {
            debug!(lat = current.coordinate.latitude, lon = current.coordinate.longitude, "Resolved city");
            Ok(current.coordinate)
        }
        Err(err) if err.is_transport() => {
            warn!(error = %err, "Provider unreachable during coordinate resolution");
            Err(err)
        }
        Err(err) => {
            warn!(error = %err, "Coordinate resolution failed");
            Err(WeatherError::CityNotFound {
                details: format!("Failed to fetch coordinates: {}", err.details()),
            })
        }
    }
}
