//! Interactive terminal conversation with Alfred.

use crate::agent::{AgentOutcome, AgentStep, TurnStatus};
use crate::application::session::{Session, SessionError};
use crate::model::ModelProvider;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

enum LoopControl {
    Continue,
    Exit,
}

pub async fn run<P>(mut session: Session<P>) -> Result<(), StdioError>
where
    P: ModelProvider + 'static,
{
    let mut stdout = io::stdout();
    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();
    let mut last_steps: Vec<AgentStep> = Vec::new();

    write_line(&mut stdout, &format!("Alfred: {}", session.greeting())).await?;
    write_line(
        &mut stdout,
        "(Type your question, /help for commands, or exit to leave.)",
    )
    .await?;

    loop {
        stdout.write_all(b"\nYou: ").await?;
        stdout.flush().await?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                write_line(&mut stdout, "\nInput closed. Good evening!").await?;
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if is_command(input) {
            match handle_command(input, &session, &last_steps, &mut stdout).await? {
                LoopControl::Continue => continue,
                LoopControl::Exit => break,
            }
        }

        info!(session_id = session.id(), "Processing chat question");
        tokio::select! {
            result = session.submit(input) => match result {
                Ok(outcome) => {
                    print_outcome(&mut stdout, &outcome).await?;
                    last_steps = outcome.steps;
                }
                Err(SessionError::EmptyQuestion) => continue,
                Err(err) => {
                    error!(%err, "Chat turn failed");
                    write_line(&mut stdout, &format!("\nAlfred: {}", err.user_message())).await?;
                    last_steps.clear();
                }
            },
            _ = tokio::signal::ctrl_c() => {
                write_line(&mut stdout, "\n(Interrupted. Alfred has set that question aside.)").await?;
            }
        }
    }

    stdout.flush().await?;
    Ok(())
}

fn is_command(input: &str) -> bool {
    input.starts_with('/') || input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

async fn handle_command<P: ModelProvider>(
    input: &str,
    session: &Session<P>,
    last_steps: &[AgentStep],
    stdout: &mut io::Stdout,
) -> Result<LoopControl, StdioError> {
    let name = input
        .trim_start_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    debug!(command = %name, "Processing chat command");

    match name.as_str() {
        "exit" | "quit" | "q" => {
            write_line(stdout, "Alfred: Farewell, and enjoy the rest of the gala!").await?;
            Ok(LoopControl::Exit)
        }
        "help" | "?" => {
            write_line(stdout, "Commands:").await?;
            write_line(stdout, "  /steps    show the reasoning steps of the last answer").await?;
            write_line(stdout, "  /history  show this conversation").await?;
            write_line(stdout, "  /tools    list Alfred's tools").await?;
            write_line(stdout, "  /exit     leave (also: exit, quit)").await?;
            Ok(LoopControl::Continue)
        }
        "steps" => {
            if last_steps.is_empty() {
                write_line(stdout, "No tool steps in the last answer.").await?;
            } else {
                print_steps(stdout, last_steps).await?;
            }
            Ok(LoopControl::Continue)
        }
        "tools" => {
            for tool in session.agent().tools().list() {
                write_line(stdout, &format!("  {}: {}", tool.name, tool.description)).await?;
            }
            Ok(LoopControl::Continue)
        }
        "history" => {
            for entry in session.history() {
                write_line(
                    stdout,
                    &format!(
                        "[{}] {}: {}",
                        entry.at.format("%H:%M:%S"),
                        entry.message.role.as_str(),
                        entry.message.content
                    ),
                )
                .await?;
            }
            Ok(LoopControl::Continue)
        }
        other => {
            write_line(
                stdout,
                &format!("Unknown command '{other}'. Use /help for the list."),
            )
            .await?;
            Ok(LoopControl::Continue)
        }
    }
}

async fn print_outcome(stdout: &mut io::Stdout, outcome: &AgentOutcome) -> Result<(), StdioError> {
    write_line(stdout, &format!("\nAlfred: {}", outcome.answer)).await?;
    if outcome.status == TurnStatus::Failed {
        write_line(stdout, "(Use /steps to see what Alfred tried.)").await?;
    }
    Ok(())
}

async fn print_steps(stdout: &mut io::Stdout, steps: &[AgentStep]) -> Result<(), StdioError> {
    for (index, step) in steps.iter().enumerate() {
        write_line(stdout, &format!("Step {}:", index + 1)).await?;
        if !step.thought.is_empty() {
            write_line(stdout, &format!("  Thought: {}", step.thought)).await?;
        }
        if let Some(action) = &step.action {
            write_line(
                stdout,
                &format!(
                    "  Action: {action} ({})",
                    step.action_input.as_deref().unwrap_or("")
                ),
            )
            .await?;
        }
        write_line(stdout, &format!("  Observation: {}", step.observation)).await?;
    }
    Ok(())
}

async fn write_line(stdout: &mut io::Stdout, text: &str) -> Result<(), StdioError> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    Ok(())
}
