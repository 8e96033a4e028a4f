//! # Agent Module
//!
//! Alfred's reasoning loop. Each turn renders the ReAct prompt, asks the
//! model for the next step, parses the reply with an explicit grammar and
//! either dispatches a tool or returns the final answer.
//!
//! ## Key Types
//!
//! - [`Agent`] - Runs one turn against a [`ModelProvider`](crate::model::ModelProvider)
//! - [`AgentOptions`] - Provider, model, prompt template and iteration cap
//! - [`AgentOutcome`] - Final answer (or apology) plus the turn transcript
//! - [`AgentError`] - Failures that abort a turn
//!
//! ## Agent Loop
//!
//! 1. Render the prompt with the transcript so far
//! 2. Call the model, stopping before it writes its own observation
//! 3. `Final Answer:` ends the turn
//! 4. `Action:` + `Action Input:` runs a tool and records the observation
//! 5. Anything else records a corrective observation and tries again
//!
//! The loop makes at most `max_iterations` model calls.

mod directive;
mod errors;
mod models;
mod runner;
mod runtime;

pub use directive::{AgentDirective, ParseError, ParsedOutput};
pub use errors::AgentError;
pub use models::{AgentOptions, AgentOutcome, AgentStep, StepOutcome, TurnStatus};
pub use runner::Agent;
pub use runtime::parse_output;

#[cfg(test)]
mod tests;
