use super::*;
use crate::application::tooling::{ToolInvokeError, ToolRegistry, ToolSpec};
use crate::constants::OBSERVATION_STOP;
use crate::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const HANG: &str = "<hang>";

#[derive(Clone)]
struct ScriptedProvider {
    responses: Arc<Mutex<Vec<String>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(String::from).collect(),
            )),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request);
        let response = {
            let mut responses = self.responses.lock().await;
            if responses.is_empty() {
                "I am not sure what to do.".to_string()
            } else {
                responses.remove(0)
            }
        };
        if response == HANG {
            std::future::pending::<()>().await;
        }
        Ok(ModelResponse::new(response))
    }
}

fn registry() -> Arc<ToolRegistry> {
    let registry = ToolRegistry::builder()
        .register(ToolSpec::new(
            "Gala_Information_Retriever",
            "Gala facts.",
            "a question",
            |query: String| async move { Ok(format!("Notes about {query}")) },
        ))
        .and_then(|b| {
            b.register(ToolSpec::new(
                "get_current_weather",
                "Weather.",
                "a city",
                |_city: String| async { Err(ToolInvokeError::Failed("service down".into())) },
            ))
        })
        .and_then(|b| {
            b.register(ToolSpec::new(
                "warming_up",
                "Not ready.",
                "",
                |_input: String| async { Err(ToolInvokeError::NotInitialized) },
            ))
        })
        .expect("registry");
    Arc::new(registry.build())
}

fn agent(provider: &ScriptedProvider, max_iterations: usize) -> Agent<ScriptedProvider> {
    Agent::new(
        Arc::new(provider.clone()),
        registry(),
        AgentOptions::new("gemini", "gemini-2.5-flash").with_max_iterations(max_iterations),
    )
}

#[tokio::test]
async fn immediate_final_answer_ends_turn() {
    let provider = ScriptedProvider::new(vec!["Final Answer: 42"]);

    let outcome = agent(&provider, 8).run("What is the answer?").await.expect("turn");

    assert_eq!(outcome.status, TurnStatus::Done);
    assert_eq!(outcome.answer, "42");
    assert!(outcome.steps.is_empty());
    assert_eq!(outcome.iterations, 1);
}

#[tokio::test]
async fn requests_carry_prompt_and_stop_sequence() {
    let provider = ScriptedProvider::new(vec!["Final Answer: Good evening."]);

    agent(&provider, 8).run("Who is hosting?").await.expect("turn");

    let records = provider.requests().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stop, vec![OBSERVATION_STOP.to_string()]);
    assert_eq!(records[0].provider, "gemini");
    let prompt = &records[0].messages[0].content;
    assert!(prompt.contains("Question: Who is hosting?"));
    assert!(prompt.contains("Gala_Information_Retriever, get_current_weather, warming_up"));
    assert!(prompt.ends_with("Thought:"));
}

#[tokio::test]
async fn tool_observation_feeds_the_next_prompt() {
    let provider = ScriptedProvider::new(vec![
        " I should consult my notes.\nAction: Gala_Information_Retriever\nAction Input: Dr. Eleanor Vance",
        " I now know the final answer\nFinal Answer: She enjoys astrophysics and chess.",
    ]);

    let outcome = agent(&provider, 8).run("Tell me about Dr. Vance").await.expect("turn");

    assert!(outcome.is_done());
    assert_eq!(outcome.answer, "She enjoys astrophysics and chess.");
    assert_eq!(outcome.steps.len(), 1);
    let step = &outcome.steps[0];
    assert_eq!(step.outcome, StepOutcome::Observed);
    assert_eq!(step.thought, "I should consult my notes.");
    assert_eq!(step.action.as_deref(), Some("Gala_Information_Retriever"));
    assert_eq!(step.observation, "Notes about Dr. Eleanor Vance");

    let records = provider.requests().await;
    assert_eq!(records.len(), 2);
    assert!(records[1].messages[0].content.ends_with(
        "Action Input: Dr. Eleanor Vance\nObservation: Notes about Dr. Eleanor Vance\nThought: "
    ));
}

#[tokio::test]
async fn unknown_tool_is_corrected_and_turn_continues() {
    let provider = ScriptedProvider::new(vec![
        "Action: search_the_web\nAction Input: fireworks",
        "Final Answer: The fireworks begin at ten.",
    ]);

    let outcome = agent(&provider, 8).run("When are the fireworks?").await.expect("turn");

    assert!(outcome.is_done());
    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(outcome.steps[0].outcome, StepOutcome::Corrected);
    assert!(
        outcome.steps[0]
            .observation
            .starts_with("search_the_web is not a valid tool, try one of [")
    );
}

#[tokio::test]
async fn failing_tool_becomes_observation() {
    let provider = ScriptedProvider::new(vec![
        "Action: get_current_weather\nAction Input: London",
        "Final Answer: I cannot see the sky tonight.",
    ]);

    let outcome = agent(&provider, 8).run("Fireworks in London?").await.expect("turn");

    assert!(outcome.is_done());
    assert_eq!(outcome.steps[0].outcome, StepOutcome::ToolFailed);
    assert_eq!(
        outcome.steps[0].observation,
        "Tool 'get_current_weather' failed: service down"
    );
}

#[tokio::test]
async fn uninitialised_backend_aborts_the_turn() {
    let provider = ScriptedProvider::new(vec!["Action: warming_up\nAction Input: now"]);

    let err = agent(&provider, 8).run("Anything?").await.expect_err("aborted");

    assert!(matches!(err, AgentError::NotInitialized { tool } if tool == "warming_up"));
}

#[tokio::test]
async fn malformed_output_stops_exactly_at_the_cap() {
    let provider = ScriptedProvider::new(Vec::new());

    let outcome = agent(&provider, 3).run("Hello?").await.expect("turn");

    assert_eq!(outcome.status, TurnStatus::Failed);
    assert!(!outcome.answer.is_empty());
    assert_eq!(outcome.iterations, 3);
    assert_eq!(outcome.steps.len(), 3);
    assert!(
        outcome
            .steps
            .iter()
            .all(|step| step.outcome == StepOutcome::Corrected)
    );
    assert!(outcome.steps[0].observation.starts_with("Invalid Format:"));
    assert_eq!(provider.requests().await.len(), 3);
}

#[tokio::test]
async fn zero_iterations_still_allows_one_call() {
    let provider = ScriptedProvider::new(vec!["Final Answer: yes"]);

    let outcome = agent(&provider, 0).run("Ready?").await.expect("turn");

    assert_eq!(outcome.answer, "yes");
}

#[tokio::test]
async fn dropping_a_turn_leaves_the_agent_usable() {
    let provider = ScriptedProvider::new(vec![HANG, "Final Answer: Still here."]);
    let agent = agent(&provider, 8);

    let abandoned = tokio::time::timeout(Duration::from_millis(20), agent.run("first")).await;
    assert!(abandoned.is_err());

    let outcome = agent.run("second").await.expect("turn");
    assert_eq!(outcome.answer, "Still here.");
}
