//! Interview transcript
//!
//! An append-only log of turns for one session. Nothing here can remove or
//! rewrite a turn once it is recorded.

use std::fmt;

use crate::llm::{Message, Role};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<Speaker> for Role {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => Role::User,
            Speaker::Assistant => Role::Assistant,
        }
    }
}

/// One speaker's contribution to the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Message {
            role: turn.speaker.into(),
            content: turn.text.clone(),
        }
    }
}

/// Two consecutive turns viewed as question and answer
///
/// Built from positions `2k` and `2k+1`. The session always records a user
/// turn followed by its assistant reply, so `question` is the user's text and
/// `answer` is the assistant's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaPair<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

/// Ordered record of every turn in one session
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one turn at the end
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push(Turn {
            speaker,
            text: text.into(),
        });
    }

    /// Record a full exchange: the user's input and the assistant's reply
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.append(Speaker::User, user);
        self.append(Speaker::Assistant, assistant);
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent assistant turn
    pub fn last_assistant(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.speaker == Speaker::Assistant)
    }

    /// The transcript as backend messages, for history replay
    pub fn messages(&self) -> Vec<Message> {
        self.turns.iter().map(Message::from).collect()
    }

    /// Pair turns `(0,1), (2,3), ...`
    ///
    /// Assumes strict user/assistant alternation. A trailing turn without a
    /// partner is left out.
    pub fn qa_pairs(&self) -> Vec<QaPair<'_>> {
        self.turns
            .chunks_exact(2)
            .map(|pair| QaPair {
                question: &pair[0].text,
                answer: &pair[1].text,
            })
            .collect()
    }
}
