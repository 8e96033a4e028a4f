pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, knowledge, session, stdio, tooling, weather};
pub use cli::{Cli, RunMode};
pub use config::{AppConfig, ModelProviderConfig};
pub use domain::types;
pub use infrastructure::{embedding, model, server};

use application::bootstrap::bootstrap;
use serde_json::json;
use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing(cli.mode == RunMode::Chat);
    info!("Starting alfred");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }

    let alfred = bootstrap(&config).await?;

    info!(mode = ?cli.mode, "Running in selected mode");
    match cli.mode {
        RunMode::Ask => {
            let question = load_prompt(&cli)?;
            let mut session = alfred.new_session();
            let outcome = session.submit(&question).await?;
            let output = json!({
                "session_id": session.id(),
                "status": outcome.status,
                "answer": outcome.answer,
                "steps": outcome.steps,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        RunMode::Chat => {
            stdio::run(alfred.new_session()).await?;
        }
        RunMode::Rest => {
            let addr = cli.rest_addr.unwrap_or(config.rest_server.addr);
            info!(%addr, "Starting REST server");
            server::serve(
                alfred.agent(),
                alfred.session_options(),
                addr,
                config.rest_server.max_sessions,
            )
            .await?;
        }
    }
    info!("Alfred finished");
    Ok(())
}

/// Logs go to stderr. Chat mode stays at `warn` unless `RUST_LOG` says otherwise.
fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let default = if quiet { "warn" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn load_prompt(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path, "Loading question from file");
        return Ok(fs::read_to_string(path)?.trim().to_string());
    }

    if !cli.prompt.is_empty() {
        return Ok(cli.prompt.join(" ").trim().to_string());
    }

    if !io::stdin().is_terminal() {
        info!("Reading question from standard input");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer.trim().to_string());
    }

    warn!("Question not provided via arguments, file, or stdin");
    Err("a question is required via arguments, --prompt-file, or stdin".into())
}
