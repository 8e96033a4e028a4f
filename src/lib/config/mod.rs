//! # Configuration
//!
//! `alfred.toml` is parsed into raw serde structures, validated, and turned into
//! an [`AppConfig`]. API keys are never stored in the file itself: a provider's
//! `api_key` names the environment variable holding the key, and `config/.env`
//! is loaded once before any lookup.

pub mod app;
pub mod defaults;
pub mod error;
pub mod knowledge;
pub mod loader;
pub mod provider;
pub mod runtime;

pub use app::AppConfig;
pub use error::ConfigError;
pub use knowledge::{EmbeddingConfig, KnowledgeConfig};
pub use provider::{ModelInfo, ModelProviderConfig};
pub use runtime::{AgentSettings, HttpConfig, RestServerConfig, WeatherConfig};
