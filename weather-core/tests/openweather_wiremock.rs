//! Integration tests for the OpenWeather provider using wiremock.
//!
//! These drive the full fetch → sample → view model path against a mock
//! forecast endpoint.

use chrono::Utc;
use weather_core::{
    Config, DashboardOutcome, FetchFailure, UnitPreference, provider_from_config, run_cycle,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const START: i64 = 1_699_920_000;

/// Forecast payload with `n` samples at 3-hour cadence.
fn forecast_payload(n: usize, with_sun: bool) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "dt": START + i as i64 * 10_800,
                "main": { "temp": 25.0 + i as f64, "feels_like": 24.0, "humidity": 55 },
                "wind": { "speed": 4.2, "deg": 270 },
                "weather": [
                    { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
                ],
                "dt_txt": "ignored"
            })
        })
        .collect();

    let mut city = serde_json::json!({
        "id": 1279233,
        "name": "Ahmedabad",
        "country": "IN",
        "timezone": 19800
    });
    if with_sun {
        city["sunrise"] = serde_json::json!(START + 3600);
        city["sunset"] = serde_json::json!(START + 12 * 3600);
    }

    serde_json::json!({ "cod": "200", "message": 0, "cnt": n, "list": list, "city": city })
}

fn test_config(server: &MockServer) -> Config {
    Config {
        api_key: Some("TEST_KEY".into()),
        base_url: Some(server.uri()),
        timeout_secs: Some(5),
        ..Default::default()
    }
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn sends_city_key_and_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Ahmedabad"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(8, true)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let resp = provider.fetch_forecast("Ahmedabad", UnitPreference::Fahrenheit).await.unwrap();

    assert_eq!(resp.samples().len(), 8);
}

#[tokio::test]
async fn ahmedabad_celsius_renders_full_dashboard() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_payload(40, true)))
        .await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let outcome = run_cycle(provider.as_ref(), "Ahmedabad", UnitPreference::Celsius, &Utc).await;

    let DashboardOutcome::Ready(dash) = outcome else {
        panic!("expected a dashboard");
    };
    assert_eq!(dash.location, "Ahmedabad, IN");
    assert!(dash.current.temperature.ends_with("°C"));
    assert_eq!(dash.daily.len(), 5);
    assert_eq!(dash.hourly.len(), 4);
    assert_eq!(dash.trend.points.len(), 40);
    assert_eq!(dash.sun.sunrise, "01:00 AM");
}

#[tokio::test]
async fn daily_points_are_a_day_apart() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_payload(40, true)))
        .await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let resp = provider.fetch_forecast("Ahmedabad", UnitPreference::Celsius).await.unwrap();

    let stamps: Vec<i64> =
        weather_core::sampler::daily(resp.samples()).iter().map(|s| s.time.timestamp()).collect();
    let day = 86_400;
    assert_eq!(stamps, vec![START, START + day, START + 2 * day, START + 3 * day, START + 4 * day]);
}

#[tokio::test]
async fn not_found_yields_single_error_message() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let outcome = run_cycle(provider.as_ref(), "Atlantis", UnitPreference::Celsius, &Utc).await;

    assert_eq!(
        outcome,
        DashboardOutcome::Failed { message: FetchFailure::USER_MESSAGE.to_string() }
    );
}

#[tokio::test]
async fn status_failure_carries_reason() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(401).set_body_string("invalid key")).await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let err = provider.fetch_forecast("Ahmedabad", UnitPreference::Celsius).await.unwrap_err();

    assert!(err.reason.contains("401"));
    assert!(err.reason.contains("invalid key"));
    assert!(!err.reason.contains("TEST_KEY"));
}

#[tokio::test]
async fn non_ok_cod_in_body_is_failure() {
    let server = MockServer::start().await;
    let mut payload = forecast_payload(8, true);
    payload["cod"] = serde_json::json!("500");
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(payload)).await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    assert!(provider.fetch_forecast("Ahmedabad", UnitPreference::Celsius).await.is_err());
}

#[tokio::test]
async fn malformed_json_is_failure() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let err = provider.fetch_forecast("Ahmedabad", UnitPreference::Celsius).await.unwrap_err();

    assert!(err.reason.contains("parse"));
}

#[tokio::test]
async fn empty_list_is_failure() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_payload(0, true)))
        .await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    assert!(provider.fetch_forecast("Ahmedabad", UnitPreference::Celsius).await.is_err());
}

#[tokio::test]
async fn missing_sun_times_fall_back_to_placeholder() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_payload(10, false)))
        .await;

    let provider = provider_from_config(&test_config(&server)).unwrap();
    let outcome = run_cycle(provider.as_ref(), "Ahmedabad", UnitPreference::Celsius, &Utc).await;

    let DashboardOutcome::Ready(dash) = outcome else {
        panic!("expected a dashboard");
    };
    assert_eq!(dash.sun.sunrise, "N/A");
    assert_eq!(dash.sun.sunset, "N/A");
    assert_eq!(dash.daily.len(), 2);
}

#[tokio::test]
async fn unreachable_server_is_failure_without_leaking_key() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = Config {
        api_key: Some("SECRET_KEY".into()),
        base_url: Some(format!("http://127.0.0.1:{port}")),
        timeout_secs: Some(5),
        ..Default::default()
    };

    let provider = provider_from_config(&config).unwrap();
    let err = provider.fetch_forecast("Ahmedabad", UnitPreference::Celsius).await.unwrap_err();

    assert!(err.reason.contains("request to OpenWeather failed"));
    assert!(!err.reason.contains("appid"));
    assert!(!err.reason.contains("SECRET_KEY"));
    assert!(!err.to_string().contains("SECRET_KEY"));
}
