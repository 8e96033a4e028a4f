use serde::Serialize;
use utoipa::ToSchema;

use crate::config::defaults::{DEFAULT_MAX_ITERATIONS, DEFAULT_PROMPT_TEMPLATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The tool ran and its output is the observation.
    Observed,
    /// The tool returned an error; the observation explains it.
    ToolFailed,
    /// Malformed output or unknown tool; the observation tells the model what to fix.
    Corrected,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AgentStep {
    pub thought: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_input: Option<String>,
    pub observation: String,
    pub outcome: StepOutcome,
    /// Raw model reply, replayed into the scratchpad.
    #[serde(skip)]
    pub log: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub status: TurnStatus,
    pub answer: String,
    pub steps: Vec<AgentStep>,
    /// Model calls made during the turn.
    pub iterations: usize,
}

impl AgentOutcome {
    pub fn is_done(&self) -> bool {
        self.status == TurnStatus::Done
    }
}

#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub provider: String,
    pub model: String,
    pub prompt_template: String,
    pub max_iterations: usize,
}

impl AgentOptions {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    /// Values below one are raised to one.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }
}
