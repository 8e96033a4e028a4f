//! Tools the agent can call.
//!
//! A tool is a plain [`ToolSpec`] record holding a boxed async callable. The
//! [`ToolRegistry`] is assembled once and shared read-only.

mod builtin;
mod error;
mod registry;

pub use builtin::{KNOWLEDGE_TOOL, WEATHER_TOOL, knowledge_tool, weather_tool};
pub use error::{ToolError, ToolInvokeError};
pub use registry::{ToolFuture, ToolInfo, ToolRegistry, ToolRegistryBuilder, ToolSpec};
