//! Embedding providers.
//!
//! Turn text into fixed-dimension vectors for the knowledge index. Every
//! backend goes through [`HttpClientBase`](crate::infrastructure::http::HttpClientBase)
//! and reuses the `[[providers]]` entry named by `[embedding].provider`.

mod gemini;
mod ollama;
mod openai;

pub use gemini::GeminiEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAIEmbedder;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{EmbeddingConfig, ModelProviderConfig};
use crate::infrastructure::http::HttpError;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("embedding service '{service}' returned invalid response: {reason}")]
    InvalidResponse { service: String, reason: String },
}

impl EmbeddingError {
    pub fn invalid_response(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            EmbeddingError::Http(err) => err.user_message(),
            EmbeddingError::InvalidResponse { service, .. } => {
                format!("The embedding service '{service}' answered with something unexpected.")
            }
        }
    }
}

/// A backend that turns text into embedding vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// Embed a search query.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed many documents. Output order matches input order.
    ///
    /// The default calls [`embed`](EmbeddingProvider::embed) once per text;
    /// backends with a native batch endpoint override it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Build the embedder for `embedding` on top of its provider entry.
pub fn create_embedder(
    embedding: &EmbeddingConfig,
    provider: &ModelProviderConfig,
    timeout: Duration,
) -> Result<Arc<dyn EmbeddingProvider>, EmbeddingError> {
    let model = embedding.model.clone();
    if provider.is_ollama() {
        Ok(Arc::new(OllamaEmbedder::from_config(provider, model, timeout)?))
    } else if provider.is_gemini() {
        Ok(Arc::new(GeminiEmbedder::from_config(provider, model, timeout)?))
    } else {
        Ok(Arc::new(OpenAIEmbedder::from_config(provider, model, timeout)?))
    }
}

pub(crate) fn ensure_count(
    service: &str,
    expected: usize,
    vectors: Vec<Vec<f32>>,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if vectors.len() != expected {
        return Err(EmbeddingError::invalid_response(
            service,
            format!("expected {expected} embeddings, got {}", vectors.len()),
        ));
    }
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_count_rejects_short_batches() {
        let err = ensure_count("svc", 2, vec![vec![0.1]]).expect_err("short batch");
        assert!(matches!(err, EmbeddingError::InvalidResponse { .. }));
        assert_eq!(ensure_count("svc", 1, vec![vec![0.1]]).expect("ok").len(), 1);
    }

    #[test]
    fn factory_picks_backend_by_provider_type() {
        let provider = ModelProviderConfig {
            id: "local".into(),
            provider_type: "ollama".into(),
            endpoint: "http://127.0.0.1:11434".into(),
            api_key: None,
            api_path: None,
            models: Vec::new(),
        };
        let embedding = EmbeddingConfig {
            provider: "local".into(),
            model: "nomic-embed-text".into(),
        };
        let embedder =
            create_embedder(&embedding, &provider, Duration::from_secs(1)).expect("embedder");
        assert_eq!(embedder.id(), "local");
    }
}
