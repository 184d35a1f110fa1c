//! Core library for the weather service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and its OpenWeather implementation
//! - Timezone normalization and the injectable clock
//! - The assembly engine deriving 30-day, centred 24-hour and per-date hourly views
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod assemble;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod service;
pub mod time;

pub use config::{Config, ServerConfig};
pub use error::{UpstreamCall, WeatherError};
pub use forecast::ForecastSeries;
pub use model::{
    Coordinate, CurrentConditions, CurrentReport, DailyPoint, ForecastEntry, Location, WeatherPoint,
};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use service::WeatherService;
pub use time::{Clock, FixedClock, SystemClock, TimeNormalizer};
