//! Interview policy
//!
//! Builds the request for each interview turn and decides when the
//! interviewer has asked its closing question.

use tracing::debug;

use crate::llm::CompletionRequest;
use crate::transcript::Transcript;

/// Phrases the interviewer uses when it asks for any last additions
const CLOSING_PHRASES: [&str; 2] = ["additional information", "would like to add"];

/// Lexical completion check on an assistant reply
///
/// True when the lowercased text contains every closing phrase. This is a
/// heuristic tied to the wording of the interview prompt: a reworded closing
/// question is missed, and a reply that mentions both phrases for another
/// reason ends the interview early.
pub fn is_complete(text: &str) -> bool {
    let lower = text.to_lowercase();
    CLOSING_PHRASES.iter().all(|phrase| lower.contains(phrase))
}

/// Decides whether an assistant reply ends the interview
pub trait CompletionDetector: Send + Sync {
    fn is_complete(&self, assistant_text: &str) -> bool;
}

/// Default detector: looks for the closing question's wording
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosingQuestionDetector;

impl CompletionDetector for ClosingQuestionDetector {
    fn is_complete(&self, assistant_text: &str) -> bool {
        is_complete(assistant_text)
    }
}

/// Instructions and sampling settings for the interview
pub struct InterviewPolicy {
    system_prompt: String,
    temperature: f32,
    max_tokens: u32,
    detector: Box<dyn CompletionDetector>,
}

impl InterviewPolicy {
    pub fn new(system_prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            temperature,
            max_tokens,
            detector: Box::new(ClosingQuestionDetector),
        }
    }

    /// Replace the completion check
    pub fn with_detector(mut self, detector: impl CompletionDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Request for the next assistant turn: full history plus the new input
    pub fn build_request(&self, transcript: &Transcript, user_input: &str) -> CompletionRequest {
        debug!(history_len = %transcript.len(), "InterviewPolicy::build_request: called");
        CompletionRequest::conversation(
            self.system_prompt.clone(),
            transcript.messages(),
            user_input,
            self.temperature,
            self.max_tokens,
        )
    }

    pub fn is_complete(&self, assistant_text: &str) -> bool {
        self.detector.is_complete(assistant_text)
    }
}

/// Whether the interview has reached its closing question
///
/// Only moves from incomplete to complete. Later replies are not checked
/// once the flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterviewState {
    completed: bool,
}

impl InterviewState {
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Check a new assistant reply
    ///
    /// Returns true only on the call that flips the state to complete.
    pub fn observe(&mut self, policy: &InterviewPolicy, assistant_text: &str) -> bool {
        if self.completed {
            return false;
        }
        self.completed = policy.is_complete(assistant_text);
        if self.completed {
            debug!("InterviewState::observe: interview complete");
        }
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Message, Role};
    use proptest::prelude::*;

    fn policy() -> InterviewPolicy {
        InterviewPolicy::new("interview instructions", 0.7, 2048)
    }

    #[test]
    fn test_is_complete_closing_question() {
        assert!(is_complete(
            "Thanks! Is there any additional information you would like to add?"
        ));
        assert!(is_complete("ANY ADDITIONAL INFORMATION YOU WOULD LIKE TO ADD"));
        assert!(!is_complete("let's continue"));
    }

    #[test]
    fn test_is_complete_needs_both_phrases() {
        assert!(!is_complete("Do you have additional information about the budget?"));
        assert!(!is_complete("Is there anything you would like to add?"));
    }

    #[test]
    fn test_build_request_replays_history() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("hi", "What is the name of the company?");

        let req = policy().build_request(&transcript, "Acme Corp");

        assert_eq!(req.system_prompt, "interview instructions");
        assert_eq!(req.max_tokens, 2048);
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.messages[1].role, Role::Assistant);
        assert_eq!(req.messages[2], Message::user("Acme Corp"));
        // Building the request must not touch the transcript
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_custom_detector() {
        struct DoneMarker;
        impl CompletionDetector for DoneMarker {
            fn is_complete(&self, text: &str) -> bool {
                text.contains("[DONE]")
            }
        }

        let policy = policy().with_detector(DoneMarker);
        assert!(policy.is_complete("That's all. [DONE]"));
        assert!(!policy.is_complete("any additional information you would like to add?"));
    }

    #[test]
    fn test_state_flips_once() {
        let policy = policy();
        let mut state = InterviewState::default();

        assert!(!state.observe(&policy, "Who was present at the meeting?"));
        assert!(!state.is_complete());

        assert!(state.observe(&policy, "Any additional information you would like to add?"));
        assert!(state.is_complete());

        // Already complete: no second flip, no revert
        assert!(!state.observe(&policy, "let's continue"));
        assert!(state.is_complete());
    }

    proptest! {
        #[test]
        fn prop_completion_is_monotonic(
            replies in proptest::collection::vec(
                prop_oneof![
                    Just("any additional information you would like to add?".to_string()),
                    ".{0,40}",
                ],
                1..20,
            )
        ) {
            let policy = policy();
            let mut state = InterviewState::default();
            let mut seen_complete = false;
            for reply in &replies {
                state.observe(&policy, reply);
                if seen_complete {
                    prop_assert!(state.is_complete());
                }
                seen_complete = state.is_complete();
            }
            let expected = replies.iter().any(|r| is_complete(r));
            prop_assert_eq!(state.is_complete(), expected);
        }
    }
}
