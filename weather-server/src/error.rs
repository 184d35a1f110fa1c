//! Mapping of service errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, warn};
use weather_core::{UpstreamCall, WeatherError};

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug)]
pub struct ApiError(pub WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::BAD_GATEWAY)
    }

    fn summary(&self) -> String {
        match &self.0 {
            WeatherError::MissingParameter(_) => self.0.to_string(),
            WeatherError::InvalidFormat(_) => "Invalid date format. Use YYYY-MM-DD".to_string(),
            WeatherError::CityNotFound { .. } => "City not found".to_string(),
            WeatherError::Upstream { call: UpstreamCall::Current, .. } => {
                "Failed to fetch current weather data".to_string()
            }
            WeatherError::Upstream { call: UpstreamCall::Forecast, .. } => {
                "Failed to fetch forecast data".to_string()
            }
            WeatherError::DegenerateUpstreamData(_) => "Unusable weather data".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() || !self.0.is_client_error() {
            warn!(%status, error = %self.0, "Request failed");
        } else {
            debug!(%status, error = %self.0, "Rejected request");
        }

        let body = ErrorBody { error: self.summary(), details: self.0.details() };
        (status, Json(body)).into_response()
    }
}
