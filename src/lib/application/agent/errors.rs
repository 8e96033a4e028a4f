use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("tool '{tool}' is not ready yet")]
    NotInitialized { tool: String },
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::NotInitialized { .. } => {
                "Alfred is still preparing the gala notes. Please ask again in a moment."
                    .to_string()
            }
        }
    }
}
