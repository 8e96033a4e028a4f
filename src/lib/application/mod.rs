//! # Application Module
//!
//! Alfred's core logic.
//!
//! ## Submodules
//!
//! - [`agent`] - The ReAct reasoning loop
//! - [`knowledge`] - Gala knowledge ingestion, chunking and retrieval
//! - [`weather`] - Geocode-then-forecast weather lookup
//! - [`tooling`] - Tool specs and the registry the agent dispatches through
//! - [`session`] - Per-conversation state
//! - [`bootstrap`] - Builds everything from configuration
//! - [`stdio`] - Interactive terminal chat

pub mod agent;
pub mod bootstrap;
pub mod knowledge;
pub mod session;
pub mod stdio;
pub mod tooling;
pub mod weather;
