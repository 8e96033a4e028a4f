use thiserror::Error;

/// Failure raised by a tool's own callable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolInvokeError {
    /// The tool's backing resource has not finished initialising.
    #[error("tool backend is not initialized")]
    NotInitialized,
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool requested: {0}")]
    UnknownTool(String),
    #[error("tool '{0}' is registered more than once")]
    DuplicateTool(String),
    #[error("failed to execute tool '{tool}': {source}")]
    Execution {
        tool: String,
        #[source]
        source: ToolInvokeError,
    },
}

impl ToolError {
    pub fn user_message(&self) -> String {
        match self {
            ToolError::UnknownTool(name) => format!("Tool \"{name}\" is not available."),
            ToolError::DuplicateTool(name) => {
                format!("Tool \"{name}\" was registered twice; check the tool setup.")
            }
            ToolError::Execution { tool, source } => {
                format!("Tool \"{tool}\" failed: {source}")
            }
        }
    }
}
