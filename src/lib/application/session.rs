//! One conversation with Alfred.
//!
//! A [`Session`] owns its visible history and serialises its own turns
//! through `&mut self`. The agent (model, tools, knowledge) is shared
//! read-only between sessions.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::agent::{Agent, AgentError, AgentOutcome};
use crate::constants::GREETING;
use crate::model::ModelProvider;
use crate::types::{ChatMessage, HistoryEntry};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::EmptyQuestion => "Please ask Alfred a question.".to_string(),
            SessionError::Agent(err) => err.user_message(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Minimum pause between the end of one turn and the start of the next.
    pub min_turn_interval: Duration,
}

pub struct Session<P: ModelProvider> {
    id: String,
    agent: Arc<Agent<P>>,
    options: SessionOptions,
    history: Vec<HistoryEntry>,
    last_turn_finished: Option<Instant>,
}

impl<P: ModelProvider> Session<P> {
    pub fn new(agent: Arc<Agent<P>>, options: SessionOptions) -> Self {
        let id = Uuid::new_v4().to_string();
        debug!(session_id = id.as_str(), "Session created");
        Self {
            id,
            agent,
            options,
            history: vec![HistoryEntry::now(ChatMessage::assistant(GREETING))],
            last_turn_finished: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn greeting(&self) -> &str {
        GREETING
    }

    pub fn agent(&self) -> &Agent<P> {
        &self.agent
    }

    /// Run one turn and record it in the history.
    ///
    /// The history only changes once the turn has finished, so a dropped
    /// turn leaves no trace.
    pub async fn submit(&mut self, question: &str) -> Result<AgentOutcome, SessionError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        if let Some(finished) = self.last_turn_finished {
            let ready_at = finished + self.options.min_turn_interval;
            if ready_at > Instant::now() {
                debug!(session_id = self.id.as_str(), "Waiting for the turn interval");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        info!(session_id = self.id.as_str(), "Session turn started");
        let result = self.agent.run(question).await;
        self.last_turn_finished = Some(Instant::now());
        self.history
            .push(HistoryEntry::now(ChatMessage::user(question)));

        match result {
            Ok(outcome) => {
                self.history
                    .push(HistoryEntry::now(ChatMessage::assistant(outcome.answer.clone())));
                Ok(outcome)
            }
            Err(err) => {
                warn!(session_id = self.id.as_str(), error = %err, "Session turn failed");
                self.history
                    .push(HistoryEntry::now(ChatMessage::assistant(err.user_message())));
                Err(err.into())
            }
        }
    }
}
