use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("knowledge base has not been built yet")]
    NotInitialized,
    #[error("knowledge base is already built")]
    AlreadyBuilt,
    #[error("retrieval is unavailable: {reason}")]
    RetrievalUnavailable { reason: String },
    #[error("chunk overlap {overlap} must be smaller than chunk size {size}")]
    InvalidChunking { size: usize, overlap: usize },
    #[error("failed to read knowledge source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse guest records in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to embed knowledge chunks: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("embedding service returned {found} vectors for {expected} chunks")]
    EmbeddingCount { expected: usize, found: usize },
    #[error("embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

impl KnowledgeError {
    pub fn user_message(&self) -> String {
        match self {
            KnowledgeError::NotInitialized => {
                "The gala knowledge base is still being prepared.".to_string()
            }
            KnowledgeError::RetrievalUnavailable { .. } => {
                "The gala knowledge base cannot be searched right now.".to_string()
            }
            KnowledgeError::Source { path, .. } | KnowledgeError::Parse { path, .. } => {
                format!("Knowledge file {} could not be loaded.", path.display())
            }
            KnowledgeError::Embedding(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
