use super::super::directive::ParseError;
use super::super::models::AgentStep;
use crate::application::tooling::ToolInvokeError;

/// Replay of the turn so far, appended after the prompt's trailing `Thought:`.
pub(crate) fn scratchpad(steps: &[AgentStep]) -> String {
    let mut pad = String::new();
    for step in steps {
        pad.push_str(&step.log);
        pad.push_str("\nObservation: ");
        pad.push_str(&step.observation);
        pad.push_str("\nThought: ");
    }
    pad
}

pub(crate) fn unknown_tool(tool: &str, names: &[&str]) -> String {
    format!("{tool} is not a valid tool, try one of [{}].", names.join(", "))
}

pub(crate) fn tool_failure(tool: &str, error: &ToolInvokeError) -> String {
    format!("Tool '{tool}' failed: {error}")
}

pub(crate) fn correction(error: &ParseError, names: &[&str]) -> String {
    format!(
        "Invalid Format: {error}. Reply with either\nAction: one of [{}]\nAction Input: the input to the action\nor\nFinal Answer: the final answer to the original input question",
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agent::StepOutcome;

    #[test]
    fn scratchpad_replays_logs_with_observations() {
        let step = AgentStep {
            thought: "look it up".into(),
            action: Some("get_current_weather".into()),
            action_input: Some("Paris".into()),
            observation: "Sunny".into(),
            outcome: StepOutcome::Observed,
            log: " look it up\nAction: get_current_weather\nAction Input: Paris".into(),
        };

        assert_eq!(
            scratchpad(&[step]),
            " look it up\nAction: get_current_weather\nAction Input: Paris\nObservation: Sunny\nThought: "
        );
        assert_eq!(scratchpad(&[]), "");
    }

    #[test]
    fn unknown_tool_lists_valid_names() {
        assert_eq!(
            unknown_tool("search", &["a", "b"]),
            "search is not a valid tool, try one of [a, b]."
        );
    }
}
