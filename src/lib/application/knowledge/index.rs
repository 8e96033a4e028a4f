use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::chunking::FixedSizeChunker;
use super::document::{Chunk, Document};
use super::error::KnowledgeError;
use crate::constants::CHUNK_SEPARATOR;
use crate::infrastructure::embedding::EmbeddingProvider;

pub const NOTHING_FOUND: &str = "No relevant information found in the gala knowledge base.";

struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// A retrieved chunk with its cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: Chunk,
    pub score: f32,
}

/// Embedded gala knowledge, searchable by similarity.
///
/// The entries are published exactly once through a [`OnceLock`]: queries
/// either see the complete index or fail with
/// [`KnowledgeError::NotInitialized`].
pub struct KnowledgeBase {
    embedder: Arc<dyn EmbeddingProvider>,
    chunker: FixedSizeChunker,
    entries: OnceLock<Vec<IndexEntry>>,
}

impl KnowledgeBase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, chunker: FixedSizeChunker) -> Self {
        Self {
            embedder,
            chunker,
            entries: OnceLock::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.entries.get().is_some()
    }

    /// Number of indexed chunks, zero before the build.
    pub fn len(&self) -> usize {
        self.entries.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chunk, embed and publish `documents`. Returns the number of chunks.
    pub async fn build(&self, documents: &[Document]) -> Result<usize, KnowledgeError> {
        if self.is_ready() {
            return Err(KnowledgeError::AlreadyBuilt);
        }

        let chunks: Vec<Chunk> = documents
            .iter()
            .flat_map(|document| self.chunker.chunk(document))
            .collect();
        info!(
            documents = documents.len(),
            chunks = chunks.len(),
            embedder = self.embedder.id(),
            "Building knowledge index"
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            self.embedder.embed_batch(&texts).await?
        };
        if vectors.len() != chunks.len() {
            return Err(KnowledgeError::EmbeddingCount {
                expected: chunks.len(),
                found: vectors.len(),
            });
        }
        if let Some(first) = vectors.first() {
            let expected = first.len();
            if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
                return Err(KnowledgeError::DimensionMismatch {
                    expected,
                    found: bad.len(),
                });
            }
        }

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();
        let count = entries.len();
        self.entries
            .set(entries)
            .map_err(|_| KnowledgeError::AlreadyBuilt)?;

        info!(chunks = count, "Knowledge index ready");
        Ok(count)
    }

    /// The `k` chunks most similar to `text`, best first.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<SearchResult>, KnowledgeError> {
        let entries = self.entries.get().ok_or(KnowledgeError::NotInitialized)?;
        if k == 0 || entries.is_empty() {
            return Ok(Vec::new());
        }

        let query = self.embedder.embed(text).await.map_err(|err| {
            warn!(error = %err, "Query embedding failed");
            KnowledgeError::RetrievalUnavailable {
                reason: err.to_string(),
            }
        })?;
        let dimension = entries[0].vector.len();
        if query.len() != dimension {
            return Err(KnowledgeError::RetrievalUnavailable {
                reason: format!(
                    "query embedding has {} dimensions, index has {dimension}",
                    query.len()
                ),
            });
        }

        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&entry.vector, &query),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(k, hits = scored.len(), "Knowledge query answered");
        Ok(scored)
    }

    /// Like [`query`](Self::query), joined into one observation text.
    pub async fn query_text(&self, text: &str, k: usize) -> Result<String, KnowledgeError> {
        let results = self.query(text, k).await?;
        if results.is_empty() {
            return Ok(NOTHING_FOUND.to_string());
        }
        Ok(results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR))
    }
}

/// Zero when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::embedding::EmbeddingError;
    use async_trait::async_trait;

    /// Embeds text as letter counts over `a..=z`.
    struct LetterEmbedder;

    #[async_trait]
    impl EmbeddingProvider for LetterEmbedder {
        fn id(&self) -> &str {
            "letters"
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let mut vector = vec![0.0; 26];
            for c in text.to_ascii_lowercase().chars() {
                if c.is_ascii_lowercase() {
                    vector[(c as u8 - b'a') as usize] += 1.0;
                }
            }
            Ok(vector)
        }
    }

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::new(
            Arc::new(LetterEmbedder),
            FixedSizeChunker::new(100, 10).expect("chunker"),
        )
    }

    #[test]
    fn cosine_similarity_handles_zero_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn query_ranks_closest_chunk_first() {
        let kb = knowledge();
        kb.build(&[
            Document::new("a", "aaaa"),
            Document::new("b", "bbbb"),
            Document::new("ab", "aabb"),
        ])
        .await
        .expect("build");

        let results = kb.query("aaa", 2).await.expect("query");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.document_id, "a");
        assert_eq!(results[1].chunk.document_id, "ab");
    }

    #[tokio::test]
    async fn zero_k_and_empty_index_return_nothing() {
        let kb = knowledge();
        assert_eq!(kb.build(&[]).await.expect("build"), 0);
        assert!(kb.is_ready());
        assert!(kb.query("anything", 3).await.expect("query").is_empty());
        assert_eq!(kb.query_text("anything", 3).await.expect("text"), NOTHING_FOUND);
    }

    #[tokio::test]
    async fn query_text_joins_with_separator() {
        let kb = knowledge();
        kb.build(&[Document::new("a", "aaaa"), Document::new("ab", "aabb")])
            .await
            .expect("build");

        let text = kb.query_text("a", 2).await.expect("text");

        assert_eq!(text, "aaaa\n---\naabb");
    }
}
