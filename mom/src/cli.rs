//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mom - Meeting Minutes interview bot
#[derive(Debug, Parser)]
#[command(
    name = "mom",
    about = "Interview a consultant about a meeting and write the Meeting Minutes",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// LLM provider override (openai, anthropic)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Model override
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature override
    #[arg(short, long, global = true, value_parser = parse_temperature)]
    pub temperature: Option<f32>,

    /// Subcommand to execute (defaults to `interview`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive interview (default)
    Interview,

    /// Print the prompt templates in effect
    Prompts {
        /// Prompt name (interview, mom, mom-user); all when omitted
        name: Option<String>,
    },
}

fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("temperature must be between 0.0 and 2.0, got {}", value))
    }
}
