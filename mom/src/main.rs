//! mom - Meeting Minutes interview bot
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use mombot::cli::{Cli, Command};
use mombot::config::Config;
use mombot::prompts::{PromptLoader, embedded};
use mombot::session;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logs go to a file so they never interleave with the interview on stdout
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mombot")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("mombot.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

/// Load `.env` from the working directory, if present
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("load_dotenv: no .env file"),
        Err(e) => warn!("Failed to load .env: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    load_dotenv();

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_overrides(cli.provider.as_deref(), cli.model.as_deref(), cli.temperature);

    info!(
        "mombot loaded config: provider={} model={} temperature={}",
        config.llm.provider, config.llm.model, config.llm.temperature
    );

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Prompts { name }) => cmd_prompts(&config, name.as_deref()),
        Some(Command::Interview) | None => session::run_interactive(&config).await,
    }
}

/// Print the prompt templates as the interview would load them
fn cmd_prompts(config: &Config, name: Option<&str>) -> Result<()> {
    debug!(?name, "cmd_prompts: called");
    let worktree = std::env::current_dir()?;
    let loader = PromptLoader::new(config.interview.prompts_dir.as_deref(), &worktree);

    let names: Vec<&str> = match name {
        Some(name) => vec![name],
        None => embedded::NAMES.to_vec(),
    };

    for (i, name) in names.iter().enumerate() {
        let content = loader.load(name)?;
        if i > 0 {
            println!();
        }
        println!("{}", format!("==> {} <==", name).bright_cyan());
        println!("{}", content);
    }
    Ok(())
}
