//! Route definitions

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Create the router with all routes, CORS open to any origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/weather", get(handlers::current_weather))
        .route("/forecast", get(handlers::daily_forecast))
        .route("/hourly", get(handlers::hourly_window))
        .route("/hourly_forecast", get(handlers::hourly_for_date))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
