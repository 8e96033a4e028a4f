use crate::application::tooling::ToolRegistry;

/// One `name: description (input: hint)` line per tool.
fn describe_tools(tools: &ToolRegistry) -> String {
    tools
        .list()
        .iter()
        .map(|tool| {
            let mut line = format!("{}: {}", tool.name, tool.description.trim());
            if !tool.input_hint.trim().is_empty() {
                line.push_str(&format!(" (input: {})", tool.input_hint.trim()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill `{{tools}}`, `{{tool_names}}`, `{{question}}` and `{{scratchpad}}`.
///
/// Substitution is single pass, so placeholder text inside the question or
/// the scratchpad is left alone. Unknown placeholders are kept verbatim.
pub(crate) fn render_prompt(
    template: &str,
    tools: &ToolRegistry,
    question: &str,
    scratchpad: &str,
) -> String {
    let tool_lines = describe_tools(tools);
    let tool_names = tools.names().join(", ");

    let mut rendered = String::with_capacity(template.len() + scratchpad.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rendered.push_str(&rest[open..]);
            return rendered;
        };
        let value = match &after[..close] {
            "tools" => Some(tool_lines.as_str()),
            "tool_names" => Some(tool_names.as_str()),
            "question" => Some(question),
            "scratchpad" => Some(scratchpad),
            _ => None,
        };
        match value {
            Some(value) => rendered.push_str(value),
            None => rendered.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tooling::ToolSpec;

    fn registry() -> ToolRegistry {
        ToolRegistry::builder()
            .register(ToolSpec::new("alpha", "First tool.", "a word", |i| async move {
                Ok(i)
            }))
            .and_then(|b| b.register(ToolSpec::new("beta", "Second tool.", "", |i| async move { Ok(i) })))
            .expect("registry")
            .build()
    }

    #[test]
    fn fills_every_placeholder() {
        let prompt = render_prompt(
            "{{tools}}\n[{{tool_names}}]\nQ: {{question}}\nThought:{{scratchpad}}",
            &registry(),
            "Who is here?",
            " done",
        );

        assert_eq!(
            prompt,
            "alpha: First tool. (input: a word)\nbeta: Second tool.\n[alpha, beta]\nQ: Who is here?\nThought: done"
        );
    }

    #[test]
    fn question_text_is_not_re_expanded() {
        let prompt = render_prompt("{{question}}|{{other}}|{{", &registry(), "{{tools}}", "");
        assert_eq!(prompt, "{{tools}}|{{other}}|{{");
    }
}
