use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "alfred",
    version,
    about = "Alfred, your gala host: asks the guest list, the menu and the sky"
)]
pub struct Cli {
    /// Path to alfred.toml (defaults to config/alfred.toml)
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long, short, value_enum, default_value_t = RunMode::Chat)]
    pub mode: RunMode,
    /// Overrides `[rest_server].addr`
    #[arg(long)]
    pub rest_addr: Option<SocketAddr>,
    /// Read the question for `ask` mode from a file
    #[arg(long)]
    pub prompt_file: Option<String>,
    /// Question for `ask` mode
    pub prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// Answer one question and print the result as JSON
    Ask,
    /// Interactive terminal conversation
    Chat,
    /// REST API server
    Rest,
}
