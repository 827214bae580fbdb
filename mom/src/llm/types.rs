//! LLM request/response types
//!
//! Provider-agnostic shapes for a single chat completion. The OpenAI and
//! Anthropic clients translate these to and from their wire formats.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LlmError;

/// Sampling temperature used for both the interview and the minutes
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (interview or minutes instructions)
    pub system_prompt: String,

    /// Conversation messages, oldest first
    pub messages: Vec<Message>,

    /// Max tokens for response (capped by the client config)
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Replay prior history and append one new user message
    pub fn conversation(
        system_prompt: impl Into<String>,
        history: Vec<Message>,
        user_input: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        let mut messages = history;
        messages.push(Message::user(user_input));
        debug!(message_count = %messages.len(), %temperature, "CompletionRequest::conversation: called");
        Self {
            system_prompt: system_prompt.into(),
            messages,
            max_tokens,
            temperature,
        }
    }

    /// Single user message with no history
    pub fn one_shot(
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        debug!(%temperature, "CompletionRequest::one_shot: called");
        Self::conversation(system_prompt, Vec::new(), user_message, temperature, max_tokens)
    }

    /// The last user message, which is the new input for this call
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage, logged per call
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Build a plain text response (used by tests and the mock client)
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// Take the text out of the response, treating missing or blank text as a failure
    pub fn into_text(self) -> Result<String, LlmError> {
        debug!(stop_reason = ?self.stop_reason, "CompletionResponse::into_text: called");
        match self.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => {
                debug!("CompletionResponse::into_text: no usable content");
                Err(LlmError::EmptyResponse)
            }
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
}

impl StopReason {
    /// Parse from Anthropic API stop_reason string
    pub fn from_anthropic(s: &str) -> Self {
        match s {
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }

    /// Parse from OpenAI API finish_reason string
    pub fn from_openai(s: Option<&str>) -> Self {
        match s {
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
