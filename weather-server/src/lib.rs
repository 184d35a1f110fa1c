//! HTTP surface of the weather service.
//!
//! Routes map one-to-one onto [`weather_core::WeatherService`] operations; all shaping of
//! the data happens in the core.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
