use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_TURNS: usize = 10;
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the hosted chat model.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_turns: usize,
}

/// Settings for the weather data provider.
#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ModelConfig {
    /// Load from the process environment, reading `.env` first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);
        Ok(Self {
            api_key: env.required("GEMINI_API_KEY")?,
            base_url: env.or("GEMINI_BASE_URL", GEMINI_OPENAI_BASE),
            model: env.or("GEMINI_MODEL", DEFAULT_MODEL),
            timeout: Duration::from_secs(env.parsed_positive("MODEL_TIMEOUT_SECS", DEFAULT_MODEL_TIMEOUT_SECS)?),
            max_turns: env.parsed_positive("AGENT_MAX_TURNS", DEFAULT_MAX_TURNS)?,
        })
    }
}

impl WeatherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);
        Ok(Self {
            api_key: env.required("WEATHER_API_KEY")?,
            base_url: env.or("WEATHER_BASE_URL", conduit_shared::toolbelts::weather::OPENWEATHER_API_BASE),
            timeout: Duration::from_secs(env.parsed_positive("WEATHER_TIMEOUT_SECS", DEFAULT_WEATHER_TIMEOUT_SECS)?),
        })
    }
}

// Keys never end up in logs.
impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("loaded environment from {}", path.display());
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    // Blank values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        }
    }

    // A zero timeout or turn limit would fail every request.
    fn parsed_positive<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Default + PartialEq + ToString,
    {
        let value = self.parsed(key, default)?;
        if value == T::default() {
            return Err(ConfigError::Invalid {
                key,
                value: value.to_string(),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn model_config_defaults() {
        let config = ModelConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, GEMINI_OPENAI_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_turns, 10);
    }

    #[test]
    fn missing_or_blank_key_is_fatal() {
        let err = ModelConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GEMINI_API_KEY"));
        assert_eq!(err.to_string(), "GEMINI_API_KEY environment variable is not set");

        let err = ModelConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GEMINI_API_KEY"));

        let err = WeatherConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "abc")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("WEATHER_API_KEY"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ModelConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("MODEL_TIMEOUT_SECS", "5"),
            ("AGENT_MAX_TURNS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_turns, 3);

        let weather = WeatherConfig::from_lookup(lookup(&[
            ("WEATHER_API_KEY", "w"),
            ("WEATHER_BASE_URL", "http://localhost:9000"),
        ]))
        .unwrap();
        assert_eq!(weather.base_url, "http://localhost:9000");
        assert_eq!(weather.timeout, Duration::from_secs(10));
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let err = ModelConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("AGENT_MAX_TURNS", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "AGENT_MAX_TURNS",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn zero_limits_are_rejected() {
        for key in ["MODEL_TIMEOUT_SECS", "AGENT_MAX_TURNS"] {
            let err = ModelConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "abc"), (key, "0")])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key,
                    value: "0".to_string()
                }
            );
        }

        let err = WeatherConfig::from_lookup(lookup(&[
            ("WEATHER_API_KEY", "w"),
            ("WEATHER_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "WEATHER_TIMEOUT_SECS",
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn debug_output_hides_keys() {
        let config = ModelConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
