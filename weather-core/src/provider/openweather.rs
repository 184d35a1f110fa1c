use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    error::{Result, UpstreamCall, WeatherError},
    model::{Coordinate, CurrentConditions, ForecastEntry, Location},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Issue one GET for `call` and hand back the body of a successful response.
    async fn get(&self, call: UpstreamCall, query: &[(&str, String)]) -> Result<String> {
        let endpoint = call.endpoint();
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(url = %url, "Requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                WeatherError::transport(
                    call,
                    format!("Failed to send request to OpenWeather ({endpoint}): {e}"),
                )
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::transport(call, format!("Failed to read OpenWeather {endpoint} response body: {e}"))
        })?;

        if !status.is_success() {
            let message = provider_message(&body);
            warn!(%status, %message, "OpenWeather {endpoint} request failed");
            return Err(WeatherError::upstream(call, status.as_u16(), message));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: Option<String>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

/// Description and icon of the first condition, as OpenWeather orders them by relevance.
fn condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions> {
        let query = match location {
            Location::City(city) => vec![("q", city.clone())],
            Location::Coordinate(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        };

        let body = self.get(UpstreamCall::Current, &query).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::DegenerateUpstreamData(format!("Failed to parse OpenWeather current JSON: {e}"))
        })?;

        let (description, icon) = condition(&parsed.weather);

        Ok(CurrentConditions {
            city: parsed.name,
            coordinate: Coordinate::new(parsed.coord.lat, parsed.coord.lon),
            temperature: parsed.main.temp,
            description,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            timezone_offset_secs: parsed.timezone,
            icon,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<Vec<ForecastEntry>> {
        let query = [
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
        ];

        let body = self.get(UpstreamCall::Forecast, &query).await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::DegenerateUpstreamData(format!("Failed to parse OpenWeather forecast JSON: {e}"))
        })?;

        let entries = parsed
            .list
            .into_iter()
            .map(|entry| {
                let timestamp = entry
                    .dt_txt
                    .as_deref()
                    .and_then(parse_dt_txt)
                    .or_else(|| unix_to_utc(entry.dt))
                    .ok_or_else(|| {
                        WeatherError::DegenerateUpstreamData(format!(
                            "Forecast entry has no usable timestamp (dt={})",
                            entry.dt
                        ))
                    })?;
                let (description, icon) = condition(&entry.weather);

                Ok(ForecastEntry { timestamp, temperature: entry.main.temp, description, icon })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = entries.len(), "Fetched forecast entries");
        Ok(entries)
    }
}

/// `dt_txt` is the provider's UTC wall-clock encoding, `YYYY-MM-DD HH:MM:SS`.
fn parse_dt_txt(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|ndt| ndt.and_utc())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

/// The `message` field of an OpenWeather error body, or the (truncated) raw body.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| {
            if body.trim().is_empty() { "Unknown error".to_string() } else { truncate_body(body) }
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
