use std::time::Duration;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::schemas::string_arg;
use crate::{register_toolbelt, ToolError};

pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Current conditions from OpenWeatherMap, in metric units.
pub struct Weather {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl Weather {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Conduit/0.1")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

register_toolbelt! {
    Weather {
        description: "Current weather lookups",
        tools: {
            "get_current_weather" => get_current_weather {
                description: "Get the current weather for a given location. Returns the location, temperature in Celsius and a short description of the conditions.",
                params: [
                    "location": "string" => "The city and state/country, e.g. 'New York, NY' or 'London, UK'"
                ]
            }
        }
    }
}

impl Weather {
    async fn get_current_weather(&self, args: &Value) -> Result<Value, ToolError> {
        let location = string_arg("get_current_weather", args, "location")?.trim();
        if location.is_empty() {
            return Err(ToolError::invalid("get_current_weather", "location cannot be empty"));
        }

        info!("Fetching weather for: {}", location);

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::fetch(describe_transport_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::fetch(describe_transport_error(&e)))?;

        if !status.is_success() {
            // OpenWeatherMap puts a human-readable reason in `message`, e.g. "city not found".
            let reason = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!(%status, location, "weather lookup failed: {}", reason);
            return Err(ToolError::fetch(format!(
                "weather service returned {} for '{}': {}",
                status.as_u16(),
                location,
                reason
            )));
        }

        parse_current_weather(location, &body)
    }
}

fn parse_current_weather(location: &str, body: &str) -> Result<Value, ToolError> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| ToolError::fetch(format!("malformed weather response: {}", e)))?;

    let temperature = data["main"]["temp"]
        .as_f64()
        .ok_or_else(|| ToolError::fetch("weather response is missing main.temp"))?;
    let description = data["weather"][0]["description"]
        .as_str()
        .ok_or_else(|| ToolError::fetch("weather response is missing weather[0].description"))?;

    Ok(json!({
        "location": location,
        "temperature": temperature,
        "description": description,
    }))
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "weather service timed out".to_string()
    } else if error.is_connect() {
        format!("could not connect to weather service: {}", error)
    } else {
        error.to_string()
    }
}
