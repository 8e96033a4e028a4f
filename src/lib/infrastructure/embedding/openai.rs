use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{EmbeddingError, EmbeddingProvider, ensure_count};
use crate::config::ModelProviderConfig;
use crate::infrastructure::http::{HttpClientBase, HttpError, resolve_api_key};

const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// OpenAI-compatible `/v1/embeddings` client.
pub struct OpenAIEmbedder {
    base: HttpClientBase,
    model: String,
}

impl OpenAIEmbedder {
    pub fn from_config(
        config: &ModelProviderConfig,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        Ok(Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), api_key, timeout)?,
            model: model.into(),
        })
    }

    async fn call(&self, input: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = input.len();
        let body = EmbedRequest {
            model: &self.model,
            input,
        };
        let mut response: EmbedResponse = self
            .base
            .post_with_bearer(&self.base.build_url(EMBEDDINGS_PATH), &body)
            .await?;
        response.data.sort_by_key(|item| item.index);
        let vectors = response.data.into_iter().map(|item| item.embedding).collect();
        ensure_count(&self.base.id, expected, vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbedder {
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
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}
