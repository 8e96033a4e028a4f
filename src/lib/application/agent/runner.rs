use super::directive::AgentDirective;
use super::errors::AgentError;
use super::models::{AgentOptions, AgentOutcome, AgentStep, StepOutcome, TurnStatus};
use super::runtime::{
    correction, parse_output, render_prompt, scratchpad, tool_failure, unknown_tool,
};
use crate::application::tooling::{ToolError, ToolInvokeError, ToolRegistry};
use crate::constants::OBSERVATION_STOP;
use crate::model::{ModelProvider, ModelRequest};
use crate::types::ChatMessage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Agent<P: ModelProvider> {
    provider: Arc<P>,
    tools: Arc<ToolRegistry>,
    options: AgentOptions,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(provider: Arc<P>, tools: Arc<ToolRegistry>, options: AgentOptions) -> Self {
        let options = AgentOptions {
            max_iterations: options.max_iterations.max(1),
            ..options
        };
        Self {
            provider,
            tools,
            options,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Run one turn for `question`.
    ///
    /// Model failures and an uninitialised tool backend abort the turn. Every
    /// other problem is fed back to the model as an observation until the
    /// iteration cap is reached.
    pub async fn run(&self, question: &str) -> Result<AgentOutcome, AgentError> {
        let max_iterations = self.options.max_iterations;
        let names = self.tools.names();
        let mut steps: Vec<AgentStep> = Vec::new();
        info!(
            provider = self.options.provider.as_str(),
            model = self.options.model.as_str(),
            max_iterations,
            "Agent turn started"
        );

        for iteration in 1..=max_iterations {
            let prompt = render_prompt(
                &self.options.prompt_template,
                &self.tools,
                question,
                &scratchpad(&steps),
            );
            let request = ModelRequest::new(
                self.options.provider.clone(),
                self.options.model.clone(),
                vec![ChatMessage::user(prompt)],
            )
            .with_stop(OBSERVATION_STOP);

            debug!(iteration, "Submitting agent step to model provider");
            let response = self.provider.chat(request).await?;
            let log = response.content().trim_end().to_string();

            let parsed = match parse_output(&log) {
                Ok(parsed) => parsed,
                Err(error) => {
                    warn!(iteration, %error, "Model reply did not follow the format");
                    steps.push(AgentStep {
                        thought: log.trim().to_string(),
                        action: None,
                        action_input: None,
                        observation: correction(&error, &names),
                        outcome: StepOutcome::Corrected,
                        log,
                    });
                    continue;
                }
            };

            let (tool, input) = match parsed.directive {
                AgentDirective::Final { answer } => {
                    info!(iteration, steps = steps.len(), "Agent returned final answer");
                    return Ok(AgentOutcome {
                        status: TurnStatus::Done,
                        answer,
                        steps,
                        iterations: iteration,
                    });
                }
                AgentDirective::CallTool { tool, input } => (tool, input),
            };

            info!(iteration, tool = tool.as_str(), "Agent requested tool execution");
            let (observation, outcome) = match self.tools.invoke(&tool, input.clone()).await {
                Ok(output) => (output, StepOutcome::Observed),
                Err(ToolError::UnknownTool(name)) => {
                    (unknown_tool(&name, &names), StepOutcome::Corrected)
                }
                Err(ToolError::Execution {
                    tool,
                    source: ToolInvokeError::NotInitialized,
                }) => {
                    warn!(tool = tool.as_str(), "Tool backend not initialised; aborting turn");
                    return Err(AgentError::NotInitialized { tool });
                }
                Err(ToolError::Execution { tool, source }) => {
                    (tool_failure(&tool, &source), StepOutcome::ToolFailed)
                }
                Err(other) => (other.to_string(), StepOutcome::ToolFailed),
            };

            steps.push(AgentStep {
                thought: parsed.thought,
                action: Some(tool),
                action_input: Some(input),
                observation,
                outcome,
                log,
            });
        }

        warn!(max_iterations, "Agent stopped at the iteration limit");
        Ok(AgentOutcome {
            status: TurnStatus::Failed,
            answer: format!(
                "My apologies, I could not settle on an answer within {max_iterations} steps. Perhaps you could rephrase the question?"
            ),
            steps,
            iterations: max_iterations,
        })
    }
}
