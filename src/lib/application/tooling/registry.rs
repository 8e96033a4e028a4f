use futures::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::error::{ToolError, ToolInvokeError};

pub type ToolFuture = BoxFuture<'static, Result<String, ToolInvokeError>>;
type ToolFn = Arc<dyn Fn(String) -> ToolFuture + Send + Sync>;

/// A named capability with a single free-text input.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_hint: String,
    invoke: ToolFn,
}

impl ToolSpec {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        input_hint: impl Into<String>,
        invoke: F,
    ) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolInvokeError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            input_hint: input_hint.into(),
            invoke: Arc::new(move |input| Box::pin(invoke(input))),
        }
    }

    pub fn info(&self) -> ToolInfo {
        ToolInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            input_hint: self.input_hint.clone(),
        }
    }
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_hint", &self.input_hint)
            .finish_non_exhaustive()
    }
}

/// Public description of a registered tool.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub input_hint: String,
}

#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolSpec>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, spec: ToolSpec) -> Result<Self, ToolError> {
        if self.tools.iter().any(|tool| tool.name == spec.name) {
            return Err(ToolError::DuplicateTool(spec.name));
        }
        debug!(tool = spec.name.as_str(), "Registered tool");
        self.tools.push(spec);
        Ok(self)
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}

/// Fixed set of tools, in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    pub fn list(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Run tool `name` on `input`. Names match exactly.
    pub async fn invoke(&self, name: &str, input: String) -> Result<String, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!(requested_tool = name, "Unknown tool requested by agent");
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        debug!(tool = name, input = input.as_str(), "Dispatching tool");
        match (tool.invoke)(input).await {
            Ok(output) => {
                info!(tool = name, bytes = output.len(), "Tool executed");
                Ok(output)
            }
            Err(source) => {
                warn!(tool = name, %source, "Tool execution failed");
                Err(ToolError::Execution {
                    tool: tool.name.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(name: &str) -> ToolSpec {
        ToolSpec::new(name, "Echo the input.", "any text", |input| async move {
            Ok(format!("echo: {input}"))
        })
    }

    #[tokio::test]
    async fn invokes_registered_tool() {
        let registry = ToolRegistry::builder()
            .register(echo("echo"))
            .expect("register")
            .build();

        let output = registry.invoke("echo", "hi".into()).await.expect("invoke");

        assert_eq!(output, "echo: hi");
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let registry = ToolRegistry::builder()
            .register(echo("echo"))
            .expect("register")
            .build();

        let err = registry
            .invoke("Echo", "hi".into())
            .await
            .expect_err("unknown");

        assert!(matches!(err, ToolError::UnknownTool(name) if name == "Echo"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ToolRegistry::builder()
            .register(echo("echo"))
            .and_then(|builder| builder.register(echo("echo")));

        assert!(matches!(result, Err(ToolError::DuplicateTool(name)) if name == "echo"));
    }

    #[tokio::test]
    async fn tool_failures_keep_their_source() {
        let failing = ToolSpec::new("broken", "Always fails.", "", |_| async {
            Err(ToolInvokeError::Failed("backend down".into()))
        });
        let registry = ToolRegistry::builder()
            .register(failing)
            .expect("register")
            .build();

        let err = registry.invoke("broken", String::new()).await.expect_err("fails");

        assert!(matches!(
            err,
            ToolError::Execution { source: ToolInvokeError::Failed(_), .. }
        ));
    }
}
