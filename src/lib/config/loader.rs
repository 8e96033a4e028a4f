use super::app::AppConfig;
use super::defaults::{DEFAULT_MAX_SESSIONS, DEFAULT_PROMPT_TEMPLATE, DEFAULT_REST_ADDR};
use super::error::ConfigError;
use super::knowledge::{KnowledgeConfig, RawEmbeddingConfig, RawKnowledgeConfig};
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::runtime::{
    AgentSettings, HttpConfig, RawAgentSettings, RawHttpConfig, RawRestServerConfig,
    RawWeatherConfig, RestServerConfig, WeatherConfig,
};
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    model: Option<String>,
    default_provider: Option<String>,
    prompt_template: Option<String>,
    #[serde(default)]
    providers: Vec<RawProviderConfig>,
    #[serde(default)]
    embedding: RawEmbeddingConfig,
    #[serde(default)]
    knowledge: RawKnowledgeConfig,
    #[serde(default)]
    agent: RawAgentSettings,
    #[serde(default)]
    weather: RawWeatherConfig,
    #[serde(default)]
    http: RawHttpConfig,
    #[serde(default)]
    rest_server: RawRestServerConfig,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    debug!(path = %config_path.display(), "Reading alfred configuration file");

    let content = fs::read_to_string(config_path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: config_path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, config_path)
}

pub(super) fn parse_config(content: &str, origin: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let model = parsed.model.ok_or(ConfigError::MissingModel)?;
    let default_provider = parsed
        .default_provider
        .ok_or(ConfigError::MissingDefaultProvider)?;

    if parsed.providers.is_empty() {
        return Err(ConfigError::NoProvidersConfigured);
    }

    let mut providers: Vec<ModelProviderConfig> = Vec::new();
    for raw_provider in parsed.providers {
        if raw_provider.endpoint.is_none() {
            return Err(ConfigError::MissingEndpoint {
                provider: raw_provider.id.clone(),
            });
        }
        providers.push(ModelProviderConfig::from(raw_provider));
    }
    let Some(provider) = providers.iter_mut().find(|p| p.id == default_provider) else {
        return Err(ConfigError::ProviderNotFound {
            provider: default_provider,
        });
    };
    provider.ensure_model(&model);

    let embedding = parsed.embedding.resolve(&default_provider);
    if !providers.iter().any(|p| p.id == embedding.provider) {
        return Err(ConfigError::EmbeddingProviderNotFound {
            provider: embedding.provider,
        });
    }

    Ok(AppConfig {
        default_provider,
        model,
        prompt_template: parsed
            .prompt_template
            .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string()),
        providers,
        embedding,
        knowledge: build_knowledge(parsed.knowledge)?,
        agent: build_agent(parsed.agent)?,
        weather: WeatherConfig::from(parsed.weather),
        http: HttpConfig::from(parsed.http),
        rest_server: build_rest_server(parsed.rest_server)?,
    })
}

fn build_knowledge(raw: RawKnowledgeConfig) -> Result<KnowledgeConfig, ConfigError> {
    let defaults = KnowledgeConfig::default();
    let chunk_size = raw.chunk_size.unwrap_or(defaults.chunk_size);
    let chunk_overlap = raw.chunk_overlap.unwrap_or(defaults.chunk_overlap);
    if chunk_size == 0 || chunk_overlap >= chunk_size {
        return Err(ConfigError::InvalidChunking {
            size: chunk_size,
            overlap: chunk_overlap,
        });
    }
    let top_k = raw.top_k.unwrap_or(defaults.top_k);
    if top_k == 0 {
        return Err(ConfigError::InvalidTopK);
    }

    Ok(KnowledgeConfig {
        guests: raw.guests.as_deref().map(expand_path).transpose()?,
        menu: raw.menu.as_deref().map(expand_path).transpose()?,
        schedule: raw.schedule.as_deref().map(expand_path).transpose()?,
        chunk_size,
        chunk_overlap,
        top_k,
    })
}

fn build_agent(raw: RawAgentSettings) -> Result<AgentSettings, ConfigError> {
    let defaults = AgentSettings::default();
    let max_iterations = raw.max_iterations.unwrap_or(defaults.max_iterations);
    if max_iterations == 0 {
        return Err(ConfigError::InvalidMaxIterations);
    }
    Ok(AgentSettings {
        max_iterations,
        min_turn_interval: raw
            .min_turn_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.min_turn_interval),
    })
}

fn build_rest_server(raw: RawRestServerConfig) -> Result<RestServerConfig, ConfigError> {
    let value = raw.addr.unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
    let addr = value
        .parse()
        .map_err(|source| ConfigError::InvalidAddress { value, source })?;
    let max_sessions = raw.max_sessions.unwrap_or(DEFAULT_MAX_SESSIONS);
    if max_sessions == 0 {
        return Err(ConfigError::InvalidMaxSessions);
    }
    Ok(RestServerConfig { addr, max_sessions })
}

fn expand_path(value: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(value)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|err| ConfigError::PathExpansion {
            value: value.to_string(),
            message: err.to_string(),
        })
}
