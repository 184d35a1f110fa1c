//! Request handlers. Parameter presence and format are validated by the service, before any
//! upstream call.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use weather_core::{CurrentReport, DailyPoint, WeatherPoint};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    /// `YYYY-MM-DD`; only read by `/hourly_forecast`.
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
}

pub async fn home() -> Json<Banner> {
    Json(Banner {
        message: "Weather API is running! Use /weather, /forecast, /hourly or /hourly_forecast endpoints.",
    })
}

#[instrument(skip(state))]
pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<CurrentReport>, ApiError> {
    let report = state.service.current(query.city.as_deref()).await?;
    Ok(Json(report))
}

#[instrument(skip(state))]
pub async fn daily_forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<DailyPoint>>, ApiError> {
    let outlook = state.service.outlook(query.city.as_deref()).await?;
    Ok(Json(outlook))
}

#[instrument(skip(state))]
pub async fn hourly_window(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<WeatherPoint>>, ApiError> {
    let points = state.service.hourly(query.city.as_deref()).await?;
    Ok(Json(points))
}

#[instrument(skip(state))]
pub async fn hourly_for_date(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<WeatherPoint>>, ApiError> {
    let points = state
        .service
        .hourly_for_date(query.city.as_deref(), query.date.as_deref())
        .await?;
    Ok(Json(points))
}
