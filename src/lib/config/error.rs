use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required field 'model' in configuration")]
    MissingModel,

    #[error("missing required field 'default_provider' in configuration")]
    MissingDefaultProvider,

    #[error("no providers configured - at least one [[providers]] entry is required")]
    NoProvidersConfigured,

    #[error("default provider '{provider}' not found in configured providers")]
    ProviderNotFound { provider: String },

    #[error("provider '{provider}' is missing required field 'endpoint'")]
    MissingEndpoint { provider: String },

    #[error("embedding provider '{provider}' not found in configured providers")]
    EmbeddingProviderNotFound { provider: String },

    #[error("chunk_overlap ({overlap}) must be less than chunk_size ({size})")]
    InvalidChunking { size: usize, overlap: usize },

    #[error("knowledge.top_k must be greater than zero")]
    InvalidTopK,

    #[error("agent.max_iterations must be greater than zero")]
    InvalidMaxIterations,

    #[error("rest_server.max_sessions must be greater than zero")]
    InvalidMaxSessions,

    #[error("invalid REST address '{value}': {source}")]
    InvalidAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to expand path '{value}': {message}")]
    PathExpansion { value: String, message: String },
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NotFound { path } => format!(
                "No configuration found at {}. Copy config/alfred.toml or pass --config.",
                path.display()
            ),
            other => format!("The configuration is invalid: {other}"),
        }
    }
}
