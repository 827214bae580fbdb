//! Interactive interview session
//!
//! Reads answers from the terminal, keeps the transcript, and prints the
//! Meeting Minutes on request.

mod state;

pub use self::state::{
    Command, INPUT_PROMPT, LineSource, MINUTES_FOOTER, MINUTES_HEADER, Phase, ReadOutcome, Reply, Session,
    SessionError,
};

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use eyre::{Result, eyre};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::config::Config;
use crate::interview::InterviewPolicy;
use crate::llm::{LlmClient, create_client};
use crate::mom::MomCompiler;
use crate::prompts::PromptLoader;

/// Terminal input with line editing and history
pub struct ReadlineInput {
    editor: DefaultEditor,
    /// rustyline only draws the prompt when stdin is a terminal
    echo_prompt: bool,
}

impl ReadlineInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre!("Failed to initialize readline: {}", e))?;
        let echo_prompt = !std::io::stdin().is_terminal();
        debug!(%echo_prompt, "ReadlineInput::new: called");
        Ok(Self { editor, echo_prompt })
    }
}

impl LineSource for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        if self.echo_prompt {
            let mut stdout = std::io::stdout();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.trim());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(eyre!("Readline error: {}", err)),
        }
    }
}

/// Assemble a session from config, loading prompts relative to `worktree`
pub fn build_session(config: &Config, llm: Arc<dyn LlmClient>, worktree: &Path) -> Result<Session> {
    debug!(?worktree, "build_session: called");
    let loader = PromptLoader::new(config.interview.prompts_dir.as_deref(), worktree);

    let policy = InterviewPolicy::new(loader.load("interview")?, config.llm.temperature, config.llm.max_tokens);
    let compiler = MomCompiler::new(
        loader.load("mom")?,
        &loader.load("mom-user")?,
        config.llm.temperature,
        config.llm.max_tokens,
    )
    .map_err(|e| eyre!("Invalid mom-user prompt template: {}", e))?;

    Ok(Session::new(llm, policy, compiler))
}

/// Run the interactive interview
///
/// This is the main entry point for `mom interview`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    // Validate API key early
    config.validate()?;

    let llm = create_client(&config.llm).map_err(|e| eyre!("Failed to create LLM client: {}", e))?;

    let worktree = std::env::current_dir()?;
    let mut session = build_session(config, llm, &worktree)?;

    let mut input = ReadlineInput::new()?;
    let mut stdout = std::io::stdout();
    session.run(&mut input, &mut stdout).await
}
