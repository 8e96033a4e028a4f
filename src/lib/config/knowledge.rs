use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_EMBEDDING_MODEL, DEFAULT_TOP_K,
};

/// Where the gala knowledge lives and how it is chunked and retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeConfig {
    pub guests: Option<PathBuf>,
    pub menu: Option<PathBuf>,
    pub schedule: Option<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            guests: None,
            menu: None,
            schedule: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Which provider computes embeddings. The provider id refers to a
/// `[[providers]]` entry and defaults to `default_provider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawKnowledgeConfig {
    pub(super) guests: Option<String>,
    pub(super) menu: Option<String>,
    pub(super) schedule: Option<String>,
    pub(super) chunk_size: Option<usize>,
    pub(super) chunk_overlap: Option<usize>,
    pub(super) top_k: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawEmbeddingConfig {
    pub(super) provider: Option<String>,
    pub(super) model: Option<String>,
}

impl RawEmbeddingConfig {
    pub(super) fn resolve(self, default_provider: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: self
                .provider
                .unwrap_or_else(|| default_provider.to_string()),
            model: self
                .model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        }
    }
}
