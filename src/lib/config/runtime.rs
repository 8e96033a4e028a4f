use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::defaults::DEFAULT_MAX_ITERATIONS;
use crate::constants::{
    DEFAULT_FORECAST_ENDPOINT, DEFAULT_GEOCODING_ENDPOINT, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub max_iterations: usize,
    /// Minimum pause between the end of one turn and the start of the next.
    pub min_turn_interval: Duration,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_turn_interval: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub geocoding_endpoint: String,
    pub forecast_endpoint: String,
    pub user_agent: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            forecast_endpoint: DEFAULT_FORECAST_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Live REST sessions kept before the least recently used one is dropped.
    pub max_sessions: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawAgentSettings {
    pub(super) max_iterations: Option<usize>,
    pub(super) min_turn_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawWeatherConfig {
    pub(super) geocoding_endpoint: Option<String>,
    pub(super) forecast_endpoint: Option<String>,
    pub(super) user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawHttpConfig {
    pub(super) timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawRestServerConfig {
    pub(super) addr: Option<String>,
    pub(super) max_sessions: Option<usize>,
}

impl From<RawWeatherConfig> for WeatherConfig {
    fn from(raw: RawWeatherConfig) -> Self {
        let defaults = WeatherConfig::default();
        Self {
            geocoding_endpoint: raw.geocoding_endpoint.unwrap_or(defaults.geocoding_endpoint),
            forecast_endpoint: raw.forecast_endpoint.unwrap_or(defaults.forecast_endpoint),
            user_agent: raw.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

impl From<RawHttpConfig> for HttpConfig {
    fn from(raw: RawHttpConfig) -> Self {
        Self {
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)),
        }
    }
}
