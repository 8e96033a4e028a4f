//! Gala knowledge base.
//!
//! Guest records, the menu and the schedule are ingested as [`Document`]s,
//! split into overlapping [`Chunk`]s, embedded once at startup and searched by
//! cosine similarity.

pub mod chunking;
pub mod document;
pub mod error;
pub mod index;
pub mod sources;

pub use chunking::FixedSizeChunker;
pub use document::{Chunk, Document, GuestRecord, Scalar};
pub use error::KnowledgeError;
pub use index::{KnowledgeBase, SearchResult};
pub use sources::load_documents;
