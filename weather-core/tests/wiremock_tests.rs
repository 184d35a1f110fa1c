//! Integration tests for the OpenWeather provider and the service flows using wiremock
//!
//! These tests verify request shaping, provider error propagation and the derived views
//! against a mock HTTP server.

use std::{sync::Arc, time::Duration};

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use weather_core::{
    Coordinate, FixedClock, Location, OpenWeatherProvider, TimeNormalizer, UpstreamCall,
    WeatherError, WeatherProvider, WeatherService,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const FORECAST_START: i64 = 1_704_067_200; // 2024-01-01 00:00:00 UTC

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.12, "lat": 51.5 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "main": { "temp": 8.47, "feels_like": 5.9, "humidity": 81 },
        "wind": { "speed": 4.12, "deg": 240 },
        "dt": 1_704_097_800,
        "timezone": 0,
        "name": "London",
        "cod": 200
    })
}

/// Five days of 3-hour steps; the first step of day `d` (0-based) is `10 * (d + 1)` °C.
fn sample_forecast_response() -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..40)
        .map(|i: i64| {
            let dt = FORECAST_START + i * 10_800;
            let day = i / 8;
            let stamp = Utc.timestamp_opt(dt, 0).unwrap();
            serde_json::json!({
                "dt": dt,
                "main": { "temp": 10.0 * (day as f64 + 1.0) + (i % 8) as f64 * 0.25, "humidity": 70 },
                "weather": [{ "description": format!("day {} sky", day + 1), "icon": "01d" }],
                "dt_txt": stamp.format("%Y-%m-%d %H:%M:%S").to_string()
            })
        })
        .collect();

    serde_json::json!({ "cod": "200", "cnt": 40, "list": list })
}

fn create_test_provider(mock_server: &MockServer) -> OpenWeatherProvider {
    #[allow(clippy::expect_used)]
    OpenWeatherProvider::new("KEY".to_string(), mock_server.uri(), Duration::from_secs(5))
        .expect("Failed to create provider")
}

fn create_test_service(mock_server: &MockServer) -> WeatherService {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 8, 10, 0).unwrap());
    WeatherService::with_clock(
        Arc::new(create_test_provider(mock_server)),
        Arc::new(clock),
        TimeNormalizer::new(Kolkata),
    )
}

async fn mount_json(mock_server: &MockServer, endpoint: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(mock_server)
        .await;
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn fetch_current_by_city_sends_key_and_metric_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let current = provider.fetch_current(&Location::City("London".into())).await.unwrap();

    assert_eq!(current.city, "London");
    assert_eq!(current.coordinate, Coordinate::new(51.5, -0.12));
    assert_eq!(current.description, "broken clouds");
    assert_eq!(current.icon, "04d");
    assert_eq!(current.humidity, 81);
    assert!((current.temperature - 8.47).abs() < 1e-9);
}

#[tokio::test]
async fn fetch_current_by_coordinate_uses_lat_lon() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let location = Location::Coordinate(Coordinate::new(51.5, -0.12));
    assert!(provider.fetch_current(&location).await.is_ok());
}

#[tokio::test]
async fn fetch_current_surfaces_provider_message() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/weather",
        404,
        serde_json::json!({ "cod": "404", "message": "city not found" }),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch_current(&Location::City("Atlantis".into())).await.unwrap_err();

    assert_eq!(err, WeatherError::upstream(UpstreamCall::Current, 404, "city not found"));
}

#[tokio::test]
async fn fetch_forecast_reads_dt_txt_as_utc() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/forecast", 200, sample_forecast_response()).await;

    let provider = create_test_provider(&mock_server);
    let entries = provider.fetch_forecast(Coordinate::new(51.5, -0.12)).await.unwrap();

    assert_eq!(entries.len(), 40);
    assert_eq!(entries[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(entries[39].timestamp, Utc.with_ymd_and_hms(2024, 1, 5, 21, 0, 0).unwrap());
    assert_eq!(entries[8].description, "day 2 sky");
}

#[tokio::test]
async fn fetch_forecast_malformed_body_is_degenerate() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/forecast", 200, serde_json::json!({ "list": "nope" })).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch_forecast(Coordinate::new(0.0, 0.0)).await.unwrap_err();

    assert!(matches!(err, WeatherError::DegenerateUpstreamData(_)));
}

#[tokio::test]
async fn slow_provider_times_out_as_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_current_response())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let provider =
        OpenWeatherProvider::new("KEY".into(), mock_server.uri(), Duration::from_millis(200)).unwrap();
    let err = provider.fetch_current(&Location::City("London".into())).await.unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Upstream { call: UpstreamCall::Current, status: None, .. }
    ));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn outlook_reports_unreachable_provider_as_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_current_response())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let provider =
        OpenWeatherProvider::new("KEY".into(), mock_server.uri(), Duration::from_millis(200)).unwrap();
    let service = WeatherService::new(Arc::new(provider), TimeNormalizer::new(Kolkata));
    let err = service.outlook(Some("London")).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status_code(), 502);
}

// ============================================================================
// Service flows
// ============================================================================

#[tokio::test]
async fn outlook_extends_london_forecast_to_thirty_days() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/weather", 200, sample_current_response()).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server);
    let outlook = service.outlook(Some("London")).await.unwrap();

    assert_eq!(outlook.len(), 30);
    assert_eq!(outlook[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(outlook[5].date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    assert_eq!(outlook[5].temperature, outlook[0].temperature);
    assert_eq!(outlook[5].description, "day 1 sky");
    assert_eq!(outlook[29].date, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
}

#[tokio::test]
async fn outlook_for_unknown_city_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/weather",
        404,
        serde_json::json!({ "cod": "404", "message": "city not found" }),
    )
    .await;

    let service = create_test_service(&mock_server);
    let err = service.outlook(Some("Atlantis")).await.unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert!(err.details().contains("city not found"));
}

#[tokio::test]
async fn outlook_with_empty_forecast_is_degenerate() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/weather", 200, sample_current_response()).await;
    mount_json(&mock_server, "/forecast", 200, serde_json::json!({ "list": [] })).await;

    let service = create_test_service(&mock_server);
    let err = service.outlook(Some("London")).await.unwrap_err();

    assert!(matches!(err, WeatherError::DegenerateUpstreamData(_)));
}

#[tokio::test]
async fn hourly_resolves_then_fetches_forecast_and_current() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server);
    let points = service.hourly(Some("London")).await.unwrap();

    assert!(points.len() <= 24);
    assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

    let normalizer = service.normalizer();
    let now = points.iter().find(|p| normalizer.format(&p.timestamp) == "2024-01-01 13:59").unwrap();
    assert_eq!(now.temperature, 8.5);
}

#[tokio::test]
async fn hourly_for_date_propagates_forecast_failure() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/weather", 200, sample_current_response()).await;
    mount_json(
        &mock_server,
        "/forecast",
        401,
        serde_json::json!({ "cod": 401, "message": "Invalid API key." }),
    )
    .await;

    let service = create_test_service(&mock_server);
    let err = service.hourly_for_date(Some("London"), Some("2024-01-02")).await.unwrap_err();

    assert_eq!(err, WeatherError::upstream(UpstreamCall::Forecast, 401, "Invalid API key."));
}

#[tokio::test]
async fn hourly_for_date_beyond_horizon_fabricates_full_day() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/weather", 200, sample_current_response()).await;
    mount_json(&mock_server, "/forecast", 200, sample_forecast_response()).await;

    let service = create_test_service(&mock_server);
    let points = service.hourly_for_date(Some("London"), Some("2024-03-01")).await.unwrap();

    assert_eq!(points.len(), 24);
    assert_eq!(service.normalizer().format(&points[0].timestamp), "2024-03-01 00:00");
}

#[tokio::test]
async fn invalid_input_never_reaches_the_provider() {
    let mock_server = MockServer::start().await;
    let service = create_test_service(&mock_server);

    let err = service.outlook(None).await.unwrap_err();
    assert_eq!(err, WeatherError::MissingParameter("city"));

    let err = service.hourly(Some("   ")).await.unwrap_err();
    assert_eq!(err, WeatherError::MissingParameter("city"));

    let err = service.hourly_for_date(Some("London"), Some("01/02/2024")).await.unwrap_err();
    assert!(matches!(err, WeatherError::InvalidFormat(_)));

    let err = service.hourly_for_date(Some("London"), None).await.unwrap_err();
    assert_eq!(err, WeatherError::MissingParameter("date"));

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
