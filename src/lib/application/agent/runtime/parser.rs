//! Line-oriented grammar for ReAct replies.
//!
//! A label must open a line (leading whitespace allowed) and is matched
//! case-sensitively. Its value runs until the next label line.

use super::super::directive::{AgentDirective, ParseError, ParsedOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Thought,
    Action,
    ActionInput,
    Observation,
    FinalAnswer,
    Question,
}

impl Label {
    fn is_directive(self) -> bool {
        matches!(self, Label::Action | Label::ActionInput | Label::FinalAnswer)
    }
}

// "Action Input:" must be tried before "Action:".
const LABELS: [(&str, Label); 6] = [
    ("Action Input:", Label::ActionInput),
    ("Action:", Label::Action),
    ("Final Answer:", Label::FinalAnswer),
    ("Thought:", Label::Thought),
    ("Observation:", Label::Observation),
    ("Question:", Label::Question),
];

struct Segment {
    label: Label,
    offset: usize,
    value: String,
}

fn match_label(line: &str) -> Option<(Label, &str)> {
    LABELS
        .iter()
        .find_map(|(prefix, label)| line.strip_prefix(prefix).map(|rest| (*label, rest)))
}

fn segments(text: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        if let Some((label, rest)) = match_label(line.trim_start()) {
            segments.push(Segment {
                label,
                offset,
                value: rest.to_string(),
            });
        } else if let Some(current) = segments.last_mut() {
            current.value.push('\n');
            current.value.push_str(line);
        }
        offset += raw.len();
    }
    segments
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn thought_before(text: &str, end: usize) -> String {
    let head = text[..end].trim();
    head.strip_prefix("Thought:")
        .map(str::trim)
        .unwrap_or(head)
        .to_string()
}

/// Parse one model reply.
///
/// Directive labels are tried in order and the first well-formed block wins.
/// When none is well-formed, the error of the first block is returned.
pub fn parse_output(text: &str) -> Result<ParsedOutput, ParseError> {
    let segments = segments(text);
    let Some(first) = segments.iter().position(|s| s.label.is_directive()) else {
        return Err(ParseError::NoDirective);
    };
    let thought = thought_before(text, segments[first].offset);

    let mut first_error = None;
    for index in first..segments.len() {
        if !segments[index].label.is_directive() {
            continue;
        }
        match directive_at(&segments, index) {
            Ok(directive) => return Ok(ParsedOutput { thought, directive }),
            Err(error) => {
                first_error.get_or_insert(error);
            }
        }
    }
    Err(first_error.unwrap_or(ParseError::NoDirective))
}

fn directive_at(segments: &[Segment], index: usize) -> Result<AgentDirective, ParseError> {
    let segment = &segments[index];
    match segment.label {
        Label::FinalAnswer => {
            let answer = segment.value.trim();
            if answer.is_empty() {
                return Err(ParseError::EmptyFinalAnswer);
            }
            Ok(AgentDirective::Final {
                answer: answer.to_string(),
            })
        }
        Label::Action => {
            let tool = segment.value.trim();
            if tool.is_empty() {
                return Err(ParseError::EmptyToolName);
            }
            match segments.get(index + 1) {
                Some(next) if next.label == Label::ActionInput => Ok(AgentDirective::CallTool {
                    tool: tool.to_string(),
                    input: strip_quotes(next.value.trim()).to_string(),
                }),
                _ => Err(ParseError::MissingActionInput {
                    tool: tool.to_string(),
                }),
            }
        }
        _ => Err(ParseError::MissingAction),
    }
}
