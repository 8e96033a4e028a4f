//! Provider factory - creates clients from config

use super::clients::{GeminiClient, OllamaClient, OpenAIClient};
use super::traits::ModelClient;
use crate::config::ModelProviderConfig;
use crate::infrastructure::http::HttpError;
use std::time::Duration;

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a model client based on provider type.
    ///
    /// Supported types:
    /// - `ollama`, `localai` → Ollama format
    /// - `gemini`, `google` → Gemini format
    /// - Others → OpenAI-compatible format (default)
    pub fn create(
        config: &ModelProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn ModelClient>, HttpError> {
        if config.is_ollama() {
            Ok(Box::new(OllamaClient::from_config(config, timeout)?))
        } else if config.is_gemini() {
            Ok(Box::new(GeminiClient::from_config(config, timeout)?))
        } else {
            Ok(Box::new(OpenAIClient::from_config(config, timeout)?))
        }
    }
}
