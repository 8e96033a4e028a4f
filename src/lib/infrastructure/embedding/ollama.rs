use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{EmbeddingError, EmbeddingProvider, ensure_count};
use crate::config::ModelProviderConfig;
use crate::infrastructure::http::{HttpClientBase, HttpError};

/// Ollama `/api/embed` client.
pub struct OllamaEmbedder {
    base: HttpClientBase,
    model: String,
}

impl OllamaEmbedder {
    pub fn from_config(
        config: &ModelProviderConfig,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), None, timeout)?,
            model: model.into(),
        })
    }

    async fn call(&self, input: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = input.len();
        let body = EmbedRequest {
            model: &self.model,
            input,
        };
        let response: EmbedResponse = self
            .base
            .post_no_auth(&self.base.build_url("/api/embed"), &body)
            .await?;
        ensure_count(&self.base.id, expected, response.embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.call(vec![text]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::invalid_response(&self.base.id, "no embedding"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.call(texts.iter().map(String::as_str).collect()).await
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}
