//! Application constants
//!
//! Single source of truth for paths, endpoints and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/alfred.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default OpenAI-compatible chat path
pub const DEFAULT_OPENAI_API_PATH: &str = "/v1/chat/completions";

/// Default geocoding service (Nominatim)
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Default current-conditions service (Open-Meteo)
pub const DEFAULT_FORECAST_ENDPOINT: &str = "https://api.open-meteo.com";

/// Nominatim rejects requests without an identifying agent.
pub const DEFAULT_USER_AGENT: &str = "AlfredGalaAgent/1.0";

/// Request timeout applied to every outbound HTTP call
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Separator placed between retrieved chunks in a single observation
pub const CHUNK_SEPARATOR: &str = "\n---\n";

/// Stop sequence that keeps the model from inventing its own observations
pub const OBSERVATION_STOP: &str = "\nObservation:";

/// Greeting shown at the start of every session
pub const GREETING: &str =
    "Greetings! I am Alfred, your humble gala host. How may I assist you this splendid evening?";
