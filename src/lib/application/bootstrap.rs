//! Wires configuration into a ready-to-use agent.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::application::agent::{Agent, AgentOptions};
use crate::application::knowledge::{
    FixedSizeChunker, KnowledgeBase, KnowledgeError, load_documents,
};
use crate::application::session::{Session, SessionOptions};
use crate::application::tooling::{ToolError, ToolRegistry, knowledge_tool, weather_tool};
use crate::application::weather::WeatherLookup;
use crate::config::{AppConfig, ConfigError};
use crate::infrastructure::embedding::{EmbeddingError, EmbeddingProvider, create_embedder};
use crate::infrastructure::http::HttpError;
use crate::infrastructure::weather::{NominatimGeocoder, OpenMeteoForecast};
use crate::model::{DynamicModelProvider, ModelError, ModelProvider};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl BootstrapError {
    pub fn user_message(&self) -> String {
        match self {
            BootstrapError::Config(err) => err.user_message(),
            BootstrapError::Model(err) => err.user_message(),
            BootstrapError::Embedding(err) => err.user_message(),
            BootstrapError::Http(err) => err.user_message(),
            BootstrapError::Knowledge(err) => err.user_message(),
            BootstrapError::Tool(err) => err.user_message(),
        }
    }
}

/// A built agent plus the settings every new session gets.
pub struct Alfred<P: ModelProvider> {
    agent: Arc<Agent<P>>,
    session_options: SessionOptions,
    knowledge: Arc<KnowledgeBase>,
}

impl<P: ModelProvider> Alfred<P> {
    /// Build the knowledge index and tool registry around the given backends.
    pub async fn assemble(
        config: &AppConfig,
        provider: Arc<P>,
        embedder: Arc<dyn EmbeddingProvider>,
        weather: WeatherLookup,
    ) -> Result<Self, BootstrapError> {
        let chunker = FixedSizeChunker::new(
            config.knowledge.chunk_size,
            config.knowledge.chunk_overlap,
        )?;
        let knowledge = Arc::new(KnowledgeBase::new(embedder, chunker));
        let documents = load_documents(&config.knowledge)?;
        knowledge.build(&documents).await?;

        let registry = ToolRegistry::builder()
            .register(knowledge_tool(knowledge.clone(), config.knowledge.top_k))?
            .register(weather_tool(weather))?
            .build();

        let options = AgentOptions::new(config.default_provider.clone(), config.model.clone())
            .with_prompt_template(config.prompt_template.clone())
            .with_max_iterations(config.agent.max_iterations);
        let agent = Agent::new(provider, Arc::new(registry), options);
        info!(
            provider = config.default_provider.as_str(),
            model = config.model.as_str(),
            chunks = knowledge.len(),
            "Alfred is ready"
        );

        Ok(Self {
            agent: Arc::new(agent),
            session_options: SessionOptions {
                min_turn_interval: config.agent.min_turn_interval,
            },
            knowledge,
        })
    }

    pub fn agent(&self) -> Arc<Agent<P>> {
        self.agent.clone()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn session_options(&self) -> SessionOptions {
        self.session_options
    }

    pub fn new_session(&self) -> Session<P> {
        Session::new(self.agent.clone(), self.session_options)
    }
}

/// Build Alfred with the HTTP backends named in `config`.
pub async fn bootstrap(config: &AppConfig) -> Result<Alfred<DynamicModelProvider>, BootstrapError> {
    let timeout = config.http.timeout;
    let provider = DynamicModelProvider::from_configs(&config.providers, timeout)?;

    let embedding_provider = config.provider(&config.embedding.provider).ok_or_else(|| {
        ConfigError::EmbeddingProviderNotFound {
            provider: config.embedding.provider.clone(),
        }
    })?;
    let embedder = create_embedder(&config.embedding, embedding_provider, timeout)?;

    let weather = WeatherLookup::new(
        Arc::new(NominatimGeocoder::from_config(&config.weather, timeout)?),
        Arc::new(OpenMeteoForecast::from_config(&config.weather, timeout)?),
    );

    Alfred::assemble(config, Arc::new(provider), embedder, weather).await
}
