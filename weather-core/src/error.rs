use std::fmt;

use thiserror::Error;

/// Which provider capability an [`WeatherError::Upstream`] failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamCall {
    Current,
    Forecast,
}

impl UpstreamCall {
    /// Path segment of the OpenWeather endpoint serving this call.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Current => "weather",
            Self::Forecast => "forecast",
        }
    }
}

impl fmt::Display for UpstreamCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Failures surfaced to callers of the weather service.
///
/// Every variant maps to a distinguishing status via [`WeatherError::status_code`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// A required query argument is absent or blank.
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    /// A date, stamp or hour argument is malformed or names a time that does not exist.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The provider could not resolve the city to a coordinate.
    #[error("City not found: {details}")]
    CityNotFound { details: String },

    /// The provider answered with a non-success status, or could not be reached at all.
    #[error("Upstream {call} request failed: {message}")]
    Upstream { call: UpstreamCall, status: Option<u16>, message: String },

    /// The provider answered successfully but the payload is empty or malformed.
    #[error("Upstream returned unusable data: {0}")]
    DegenerateUpstreamData(String),
}

impl WeatherError {
    pub fn upstream(call: UpstreamCall, status: u16, message: impl Into<String>) -> Self {
        Self::Upstream { call, status: Some(status), message: message.into() }
    }

    pub fn transport(call: UpstreamCall, message: impl Into<String>) -> Self {
        Self::Upstream { call, status: None, message: message.into() }
    }

    /// True when the provider could not be reached or did not answer in time.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Upstream { status: None, .. })
    }

    /// True for errors caused by the caller's input rather than the provider.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParameter(_) | Self::InvalidFormat(_))
    }

    /// HTTP-style status for this error. Provider statuses pass through untouched.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter(_) | Self::InvalidFormat(_) => 400,
            Self::CityNotFound { .. } => 404,
            Self::Upstream { status: Some(status), .. } => *status,
            Self::Upstream { status: None, .. } | Self::DegenerateUpstreamData(_) => 502,
        }
    }

    /// The provider's own text (or our description) without the summary prefix.
    pub fn details(&self) -> String {
        match self {
            Self::MissingParameter(name) => format!("{name} parameter is required"),
            Self::InvalidFormat(detail) => detail.clone(),
            Self::CityNotFound { details } => details.clone(),
            Self::Upstream { message, .. } => message.clone(),
            Self::DegenerateUpstreamData(detail) => detail.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
