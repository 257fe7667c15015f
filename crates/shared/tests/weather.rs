use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use conduit_shared::toolbelts::Weather;
use conduit_shared::{ToolError, ToolRegistry};

async fn weather_handler(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("appid").map(String::as_str) != Some("test-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"cod": 401, "message": "Invalid API key"})),
        )
            .into_response();
    }

    match params.get("q").map(String::as_str) {
        Some("London, UK") => {
            assert_eq!(params.get("units").map(String::as_str), Some("metric"));
            Json(json!({
                "name": "London",
                "main": {"temp": 14.2, "humidity": 81},
                "weather": [{"main": "Clouds", "description": "overcast clouds"}]
            }))
            .into_response()
        }
        Some("Garbled") => (StatusCode::OK, "not json at all").into_response(),
        Some("Slowtown") => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({})).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        )
            .into_response(),
    }
}

async fn spawn_mock() -> String {
    let app = Router::new().route("/data/2.5/weather", get(weather_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/data/2.5", addr)
}

async fn registry(api_key: &str, base_url: &str, timeout: Duration) -> ToolRegistry {
    let weather = Weather::new(api_key, base_url, timeout).unwrap();
    ToolRegistry::new().register(weather).unwrap()
}

async fn lookup(registry: &ToolRegistry, location: &str) -> Result<Value, ToolError> {
    registry
        .use_tool("get_current_weather", &json!({ "location": location }))
        .await
}

#[tokio::test]
async fn returns_location_temperature_and_description() {
    let base = spawn_mock().await;
    let registry = registry("test-key", &base, Duration::from_secs(5)).await;

    let value = lookup(&registry, "London, UK").await.unwrap();
    assert_eq!(value["location"], "London, UK");
    assert_eq!(value["temperature"], 14.2);
    assert_eq!(value["description"], "overcast clouds");
    assert!(value["temperature"].is_number());
    assert!(value["description"].is_string());
}

#[tokio::test]
async fn unknown_location_fails_with_provider_reason() {
    let base = spawn_mock().await;
    let registry = registry("test-key", &base, Duration::from_secs(5)).await;

    let err = lookup(&registry, "Atlantis").await.unwrap_err();
    assert!(matches!(err, ToolError::Fetch(_)));
    let message = err.to_string();
    assert!(message.contains("404"), "{}", message);
    assert!(message.contains("city not found"), "{}", message);
}

#[tokio::test]
async fn bad_api_key_is_a_fetch_error() {
    let base = spawn_mock().await;
    let registry = registry("wrong", &base, Duration::from_secs(5)).await;

    let err = lookup(&registry, "London, UK").await.unwrap_err();
    assert!(err.to_string().contains("Invalid API key"));
}

#[tokio::test]
async fn malformed_body_is_a_fetch_error() {
    let base = spawn_mock().await;
    let registry = registry("test-key", &base, Duration::from_secs(5)).await;

    let err = lookup(&registry, "Garbled").await.unwrap_err();
    assert!(matches!(err, ToolError::Fetch(_)));
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn slow_service_times_out() {
    let base = spawn_mock().await;
    let registry = registry("test-key", &base, Duration::from_millis(200)).await;

    let err = lookup(&registry, "Slowtown").await.unwrap_err();
    assert!(matches!(err, ToolError::Fetch(_)));
    assert!(err.to_string().contains("timed out"), "{}", err);
}

#[tokio::test]
async fn wrong_argument_type_never_reaches_the_network() {
    let registry = registry("test-key", "http://127.0.0.1:9", Duration::from_secs(1)).await;

    let err = registry
        .use_tool("get_current_weather", &json!({ "location": 51.5 }))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments { .. }));
}
