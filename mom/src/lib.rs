//! mombot - Meeting Minutes interview bot
//!
//! Interviews a consultant about a client meeting, one question at a time,
//! then turns the captured transcript into a Meeting Minutes (MoM) document.
//!
//! # Core Concepts
//!
//! - **One session, one document**: the transcript lives in memory and is
//!   dropped at exit
//! - **Stateless backend**: every call replays the full history
//! - **Prompts are data**: interview and minutes instructions are `.pmt`
//!   templates that can be overridden per project
//!
//! # Modules
//!
//! - [`transcript`] - Append-only turn log and Q/A pairing
//! - [`interview`] - Interview prompt, request building, completion check
//! - [`mom`] - Meeting Minutes compiler
//! - [`session`] - Input loop and command handling
//! - [`llm`] - LLM client trait with OpenAI and Anthropic implementations
//! - [`prompts`] - Prompt template loading
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod interview;
pub mod llm;
pub mod mom;
pub mod prompts;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use config::{Config, InterviewConfig, LlmConfig};
pub use interview::{ClosingQuestionDetector, CompletionDetector, InterviewPolicy, InterviewState, is_complete};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use mom::{MomCompiler, MomError, format_transcript};
pub use prompts::PromptLoader;
pub use session::{Command, Phase, Reply, Session, SessionError, build_session, run_interactive};
pub use transcript::{QaPair, Speaker, Transcript, Turn};
