use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{EmbeddingError, EmbeddingProvider, ensure_count};
use crate::config::ModelProviderConfig;
use crate::constants::DEFAULT_GEMINI_API_PATH;
use crate::infrastructure::http::{HttpClientBase, HttpError, resolve_api_key};

const TASK_QUERY: &str = "RETRIEVAL_QUERY";
const TASK_DOCUMENT: &str = "RETRIEVAL_DOCUMENT";

/// Gemini `embedContent` / `batchEmbedContents` client.
pub struct GeminiEmbedder {
    base: HttpClientBase,
    api_path: String,
    model: String,
}

impl GeminiEmbedder {
    pub fn from_config(
        config: &ModelProviderConfig,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        let model = model.into();
        Ok(Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), api_key, timeout)?,
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
            model: model.trim_start_matches("models/").to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        let path = self.api_path.trim_matches('/');
        self.base
            .build_url(&format!("{path}/{}:{method}", self.model))
    }

    fn request<'a>(&self, text: &'a str, task_type: &'static str) -> EmbedRequest<'a> {
        EmbedRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: vec![Part { text }],
            },
            task_type,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = self.request(text, TASK_QUERY);
        let response: EmbedResponse = self
            .base
            .post_with_query_key(&self.url("embedContent"), &body)
            .await?;
        Ok(response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let body = BatchRequest {
            requests: texts
                .iter()
                .map(|text| self.request(text, TASK_DOCUMENT))
                .collect(),
        };
        debug!(service = self.base.id.as_str(), count = texts.len(), "Batch embedding");
        let response: BatchResponse = self
            .base
            .post_with_query_key(&self.url("batchEmbedContents"), &body)
            .await?;
        let vectors = response.embeddings.into_iter().map(|e| e.values).collect();
        ensure_count(&self.base.id, texts.len(), vectors)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'static str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    requests: Vec<EmbedRequest<'a>>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Values,
}

#[derive(Deserialize)]
struct BatchResponse {
    #[serde(default)]
    embeddings: Vec<Values>,
}

#[derive(Deserialize)]
struct Values {
    values: Vec<f32>,
}
