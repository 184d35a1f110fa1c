use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::time::serialize_stamp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// What the current-conditions call is addressed by.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinate(Coordinate),
}

/// Current-conditions snapshot as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub coordinate: Coordinate,
    pub temperature: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Raw provider offset of the city's local time from UTC, in seconds.
    pub timezone_offset_secs: i32,
    pub icon: String,
}

/// One raw 3-hour step of the provider forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    /// Calendar date as encoded by the provider (UTC), not re-normalized.
    pub fn provider_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// The canonical point flowing through the hourly assemblers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherPoint {
    #[serde(rename = "time", serialize_with = "serialize_stamp")]
    pub timestamp: DateTime<Tz>,
    pub temperature: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    #[serde(rename = "windSpeed", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    pub description: String,
}

/// Payload of the current-weather operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentReport {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub lat: f64,
    pub lon: f64,
    /// Provider timezone offset in seconds.
    pub timezone: i32,
}

impl From<CurrentConditions> for CurrentReport {
    fn from(current: CurrentConditions) -> Self {
        Self {
            city: current.city,
            temperature: round1(current.temperature),
            description: current.description,
            humidity: current.humidity,
            wind_speed: round1(current.wind_speed),
            lat: current.coordinate.latitude,
            lon: current.coordinate.longitude,
            timezone: current.timezone_offset_secs,
        }
    }
}

/// Rounds to one decimal place, the precision of every published temperature.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
