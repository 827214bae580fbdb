//! Interview session state machine

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::interview::{InterviewPolicy, InterviewState};
use crate::llm::{LlmClient, LlmError};
use crate::mom::{MomCompiler, MomError};
use crate::transcript::Transcript;

/// Input prompt shown before every line
pub const INPUT_PROMPT: &str = "You: ";

/// Delimiters printed around the generated minutes
pub const MINUTES_HEADER: &str = "=== Meeting Minutes ===";
pub const MINUTES_FOOTER: &str = "=====================";

/// A line of user input, classified
///
/// Commands are matched case-insensitively on the trimmed line. Answers keep
/// the user's original casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank line
    Empty,
    /// `quit`
    Quit,
    /// `generate mom`
    GenerateMom,
    /// Anything else, trimmed
    Answer(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(input: &'a str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        match trimmed.to_lowercase().as_str() {
            "quit" => Command::Quit,
            "generate mom" => Command::GenerateMom,
            _ => Command::Answer(trimmed),
        }
    }
}

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting answers
    AwaitingInput,
    /// Closing question asked; answers are still accepted
    InterviewComplete,
    /// `quit` received
    Ended,
}

/// Outcome of handling one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Blank input, nothing happened
    Skipped,
    /// The interviewer's next message
    Answer {
        text: String,
        /// True only on the reply that completed the interview
        interview_completed: bool,
    },
    /// The generated Meeting Minutes
    Minutes(String),
    /// `generate mom` before the interview was complete
    NotReady,
    /// Session is over
    Quit,
}

/// Errors from one interview step
///
/// The session stays usable after any of these.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("LLM error: {0}")]
    Backend(#[from] LlmError),

    #[error("Meeting Minutes generation failed: {0}")]
    Minutes(#[from] MomError),
}

impl SessionError {
    /// Whether sending the same line again might work
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Backend(e) | SessionError::Minutes(MomError::Backend(e)) => e.is_retryable(),
            SessionError::Minutes(MomError::Render(_)) => false,
        }
    }

    /// What the user can do next, if anything
    pub fn retry_hint(&self) -> Option<&'static str> {
        if !self.is_retryable() {
            return None;
        }
        match self {
            SessionError::Backend(_) => Some("The backend may recover; send your answer again to retry."),
            SessionError::Minutes(_) => Some("The backend may recover; type 'generate mom' again to retry."),
        }
    }
}

/// Result of reading one line from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    /// Ctrl-D or end of piped input
    Eof,
}

/// Source of user input lines
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> eyre::Result<ReadOutcome>;
}

/// Fixed list of inputs, for tests and non-interactive runs
impl LineSource for VecDeque<ReadOutcome> {
    fn read_line(&mut self, _prompt: &str) -> eyre::Result<ReadOutcome> {
        Ok(self.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}

/// One interview: its transcript, completion state and collaborators
pub struct Session {
    id: Uuid,
    llm: Arc<dyn LlmClient>,
    policy: InterviewPolicy,
    compiler: MomCompiler,
    transcript: Transcript,
    state: InterviewState,
    ended: bool,
}

impl Session {
    pub fn new(llm: Arc<dyn LlmClient>, policy: InterviewPolicy, compiler: MomCompiler) -> Self {
        let id = Uuid::now_v7();
        debug!(%id, "Session::new: called");
        Self {
            id,
            llm,
            policy,
            compiler,
            transcript: Transcript::new(),
            state: InterviewState::default(),
            ended: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn phase(&self) -> Phase {
        if self.ended {
            Phase::Ended
        } else if self.state.is_complete() {
            Phase::InterviewComplete
        } else {
            Phase::AwaitingInput
        }
    }

    /// Handle one line of input
    ///
    /// A failed backend call leaves the transcript untouched, so the user can
    /// send the same answer again.
    pub async fn handle(&mut self, input: &str) -> Result<Reply, SessionError> {
        if self.ended {
            debug!(session_id = %self.id, "Session::handle: input after quit ignored");
            return Ok(Reply::Quit);
        }

        match Command::parse(input) {
            Command::Empty => Ok(Reply::Skipped),
            Command::Quit => {
                info!(session_id = %self.id, turns = %self.transcript.len(), "Session ended by user");
                self.ended = true;
                Ok(Reply::Quit)
            }
            Command::GenerateMom => {
                if !self.state.is_complete() {
                    debug!(session_id = %self.id, "Session::handle: minutes requested before completion");
                    return Ok(Reply::NotReady);
                }
                info!(session_id = %self.id, turns = %self.transcript.len(), "Generating Meeting Minutes");
                let document = self.compiler.compile(self.llm.as_ref(), &self.transcript).await?;
                Ok(Reply::Minutes(document))
            }
            Command::Answer(text) => self.answer(text).await,
        }
    }

    async fn answer(&mut self, text: &str) -> Result<Reply, SessionError> {
        debug!(session_id = %self.id, input_len = %text.len(), "Session::answer: called");
        let request = self.policy.build_request(&self.transcript, text);
        let reply = self.llm.complete(request).await?.into_text()?;
        debug!(session_id = %self.id, %reply, "Session::answer: assistant replied");

        self.transcript.push_exchange(text, reply.as_str());
        let interview_completed = self.state.observe(&self.policy, &reply);
        if interview_completed {
            info!(session_id = %self.id, turns = %self.transcript.len(), "Interview complete");
        }

        Ok(Reply::Answer {
            text: reply,
            interview_completed,
        })
    }

    /// Drive the session from a line source until `quit` or end of input
    pub async fn run<S, W>(&mut self, input: &mut S, out: &mut W) -> eyre::Result<()>
    where
        S: LineSource,
        W: Write,
    {
        info!(session_id = %self.id, "Session started");
        writeln!(out, "{}", "Welcome to the Meeting Analysis Chatbot!".bright_cyan().bold())?;
        writeln!(
            out,
            "Type {} to start conversation or Type {} to end the conversation",
            "'hi'".yellow(),
            "'quit'".yellow()
        )?;

        loop {
            writeln!(out)?;
            out.flush()?;

            let line = match input.read_line(INPUT_PROMPT)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    writeln!(out, "^C")?;
                    continue;
                }
                ReadOutcome::Eof => {
                    debug!(session_id = %self.id, "Session::run: end of input");
                    break;
                }
            };

            if Command::parse(&line) == Command::GenerateMom && self.is_complete() {
                writeln!(out, "\nGenerating Meeting Minutes...\n")?;
                out.flush()?;
            }

            match self.handle(&line).await {
                Ok(Reply::Skipped) => {}
                Ok(Reply::Quit) => break,
                Ok(Reply::Answer {
                    text,
                    interview_completed,
                }) => {
                    writeln!(out, "\n{} {}", "Bot:".bright_blue().bold(), text)?;
                    if interview_completed {
                        writeln!(
                            out,
                            "\n{}\n",
                            "Interview completed! Type 'generate mom' to create Meeting Minutes or continue the conversation."
                                .green()
                        )?;
                    }
                }
                Ok(Reply::Minutes(document)) => {
                    writeln!(out, "{}", MINUTES_HEADER)?;
                    writeln!(out, "{}", document)?;
                    writeln!(out, "{}", MINUTES_FOOTER)?;
                }
                Ok(Reply::NotReady) => {
                    writeln!(
                        out,
                        "\n{}",
                        "Please complete the interview before generating Meeting Minutes.".yellow()
                    )?;
                }
                Err(e) => {
                    warn!(session_id = %self.id, error = %e, "Interview step failed");
                    writeln!(out, "\n{} {}", "Error:".red(), e)?;
                    if let Some(hint) = e.retry_hint() {
                        writeln!(out, "{}", hint.dimmed())?;
                    }
                }
            }
        }

        writeln!(out, "\nThank you for using the Meeting Analysis Chatbot!")?;
        out.flush()?;
        info!(session_id = %self.id, turns = %self.transcript.len(), "Session finished");
        Ok(())
    }
}
