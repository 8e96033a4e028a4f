mod instructions;
mod parser;
mod transcript;

pub(super) use instructions::render_prompt;
pub use parser::parse_output;
pub(super) use transcript::{correction, scratchpad, tool_failure, unknown_tool};
