//! Application state shared across handlers

use std::sync::Arc;

use weather_core::WeatherService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

impl AppState {
    pub fn new(service: WeatherService) -> Self {
        Self { service: Arc::new(service) }
    }
}
