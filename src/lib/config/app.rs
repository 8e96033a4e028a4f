use super::error::ConfigError;
use super::knowledge::{EmbeddingConfig, KnowledgeConfig};
use super::provider::ModelProviderConfig;
use super::runtime::{AgentSettings, HttpConfig, RestServerConfig, WeatherConfig};
use std::path::Path;

/// Application configuration loaded from alfred.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub prompt_template: String,
    pub providers: Vec<ModelProviderConfig>,
    pub embedding: EmbeddingConfig,
    pub knowledge: KnowledgeConfig,
    pub agent: AgentSettings,
    pub weather: WeatherConfig,
    pub http: HttpConfig,
    pub rest_server: RestServerConfig,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text without touching the filesystem.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"))
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    /// Look up a provider by id.
    pub fn provider(&self, id: &str) -> Option<&ModelProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }
}
