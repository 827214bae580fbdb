//! Meeting Minutes compiler
//!
//! Turns the interview transcript into one Q/A block and asks the backend
//! to write the minutes from it.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::transcript::Transcript;

/// Template name for the user message
const USER_TEMPLATE: &str = "mom-user";

/// Errors from compiling the minutes
#[derive(Debug, Error)]
pub enum MomError {
    #[error("Failed to render transcript prompt: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error(transparent)]
    Backend(#[from] LlmError),
}

/// Variables available to the `mom-user` template
#[derive(Debug, Serialize)]
struct MomContext<'a> {
    interview_history: &'a str,
}

/// Format the transcript as `Q: ...\nA: ...\n\n` blocks
///
/// Uses [`Transcript::qa_pairs`], so a trailing unpaired turn is left out and
/// an empty transcript gives an empty string.
pub fn format_transcript(transcript: &Transcript) -> String {
    transcript
        .qa_pairs()
        .iter()
        .map(|pair| format!("Q: {}\nA: {}\n\n", pair.question, pair.answer))
        .collect()
}

/// Produces the Meeting Minutes document
pub struct MomCompiler {
    system_prompt: String,
    hbs: Handlebars<'static>,
    temperature: f32,
    max_tokens: u32,
}

impl std::fmt::Debug for MomCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomCompiler")
            .field("system_prompt_len", &self.system_prompt.len())
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl MomCompiler {
    /// Create a compiler from the minutes instructions and the user template
    ///
    /// The user template is parsed here so a broken override fails at startup.
    pub fn new(
        system_prompt: impl Into<String>,
        user_template: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, handlebars::TemplateError> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_template_string(USER_TEMPLATE, user_template)?;

        Ok(Self {
            system_prompt: system_prompt.into(),
            hbs,
            temperature,
            max_tokens,
        })
    }

    /// The exact user message sent for this transcript
    pub fn user_message(&self, transcript: &Transcript) -> Result<String, MomError> {
        let interview_history = format_transcript(transcript);
        debug!(
            pair_count = %transcript.qa_pairs().len(),
            history_len = %interview_history.len(),
            "MomCompiler::user_message: called"
        );
        Ok(self.hbs.render(
            USER_TEMPLATE,
            &MomContext {
                interview_history: &interview_history,
            },
        )?)
    }

    /// Generate the minutes
    ///
    /// Issues exactly one backend call, even for an empty transcript, and
    /// returns the text as the backend wrote it.
    pub async fn compile(&self, llm: &dyn LlmClient, transcript: &Transcript) -> Result<String, MomError> {
        let user_message = self.user_message(transcript)?;
        debug!(%user_message, "MomCompiler::compile: sending transcript");

        let request = CompletionRequest::one_shot(
            self.system_prompt.clone(),
            user_message,
            self.temperature,
            self.max_tokens,
        );
        let document = llm.complete(request).await?.into_text()?;

        info!(document_len = %document.len(), "Meeting Minutes generated");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;
    use crate::transcript::Speaker;

    fn compiler() -> MomCompiler {
        let loader = PromptLoader::embedded_only();
        MomCompiler::new(loader.load("mom").unwrap(), &loader.load("mom-user").unwrap(), 0.7, 4096).unwrap()
    }

    #[test]
    fn test_format_transcript_pairs() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("U1", "A1");
        transcript.push_exchange("U2", "A2");
        transcript.append(Speaker::User, "U3");

        let block = format_transcript(&transcript);
        assert_eq!(block, "Q: U1\nA: A1\n\nQ: U2\nA: A2\n\n");
        assert_eq!(block.matches("Q: ").count(), 2);
        assert!(!block.contains("U3"));
    }

    #[test]
    fn test_format_transcript_empty() {
        assert_eq!(format_transcript(&Transcript::new()), "");
    }

    #[test]
    fn test_user_message_is_not_escaped() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("R&D <team> \"leads\"", "Noted & thanks");

        let message = compiler().user_message(&transcript).unwrap();
        assert_eq!(
            message,
            "Here is the interview transcript:\n\nQ: R&D <team> \"leads\"\nA: Noted & thanks\n\n"
        );
    }

    #[test]
    fn test_user_message_does_not_expand_braces_in_answers() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("use {{interview_history}} literally", "ok");

        let message = compiler().user_message(&transcript).unwrap();
        assert!(message.contains("Q: use {{interview_history}} literally"));
    }

    #[test]
    fn test_broken_template_rejected() {
        assert!(MomCompiler::new("system", "{{#if}}", 0.7, 4096).is_err());
    }

    #[tokio::test]
    async fn test_compile_returns_backend_text_verbatim() {
        let llm = MockLlmClient::from_texts(&["## Meeting Minutes (MoM)\n\n### 1. Meeting Overview\n"]);
        let mut transcript = Transcript::new();
        transcript.push_exchange("hi", "What is the name of the company?");
        transcript.push_exchange("Acme", "Any additional information you would like to add?");

        let doc = compiler().compile(&llm, &transcript).await.unwrap();
        assert_eq!(doc, "## Meeting Minutes (MoM)\n\n### 1. Meeting Overview\n");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].system_prompt.contains("Action Items & Follow-Up"));
        assert_eq!(requests[0].messages.len(), 1);
        assert!(
            requests[0]
                .last_user_text()
                .unwrap()
                .ends_with("Q: Acme\nA: Any additional information you would like to add?\n\n")
        );
    }

    #[tokio::test]
    async fn test_compile_empty_transcript_still_calls_backend() {
        let llm = MockLlmClient::from_texts(&["Nothing was discussed."]);

        let doc = compiler().compile(&llm, &Transcript::new()).await.unwrap();
        assert_eq!(doc, "Nothing was discussed.");
        assert_eq!(llm.call_count(), 1);
        assert_eq!(
            llm.requests()[0].last_user_text(),
            Some("Here is the interview transcript:\n\n")
        );
    }

    #[tokio::test]
    async fn test_compile_propagates_backend_failure() {
        let llm = MockLlmClient::from_texts(&["unused"]).fail_on(0);

        let err = compiler().compile(&llm, &Transcript::new()).await.unwrap_err();
        assert!(matches!(err, MomError::Backend(LlmError::ApiError { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_compile_rejects_empty_document() {
        let llm = MockLlmClient::from_texts(&[""]);

        let err = compiler().compile(&llm, &Transcript::new()).await.unwrap_err();
        assert!(matches!(err, MomError::Backend(LlmError::EmptyResponse)));
    }
}
