use thiserror::Error;

/// What the model asked for in one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentDirective {
    Final { answer: String },
    CallTool { tool: String, input: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    pub thought: String,
    pub directive: AgentDirective,
}

/// Ways a model reply can fail the grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no 'Action:' or 'Final Answer:' found")]
    NoDirective,
    #[error("'Action: {tool}' is not followed by 'Action Input:'")]
    MissingActionInput { tool: String },
    #[error("'Action Input:' appears without a preceding 'Action:'")]
    MissingAction,
    #[error("'Action:' names no tool")]
    EmptyToolName,
    #[error("'Final Answer:' is empty")]
    EmptyFinalAnswer,
}
