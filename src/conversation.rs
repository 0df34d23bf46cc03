//! Conversation history
//!
//! This module keeps the ordered chat turns shown to the user and turns them
//! into generation request contents for free-form chat.

use crate::prompts::messages::GREETING;
use crate::providers::Content;
use crate::summary::timestamp;
use serde::{Deserialize, Serialize};

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the assistant
    User,
    /// The assistant
    Assistant,
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Session-unique, strictly increasing ID
    pub id: u64,
    /// Author
    pub sender: Sender,
    /// Markdown-like message text
    pub content: String,
    /// Local time the turn was added, `HH:MM`
    pub timestamp: String,
}

/// Append-only list of chat turns
///
/// IDs keep increasing across [`Conversation::clear`], so a turn ID never
/// refers to two different turns within one session.
///
/// # Examples
///
/// ```
/// use meeting_summarizer::conversation::{Conversation, Sender};
///
/// let mut conversation = Conversation::new();
/// assert_eq!(conversation.len(), 1);
///
/// conversation.push_user("What was decided?");
/// let last = conversation.turns().last().unwrap();
/// assert_eq!(last.sender, Sender::User);
/// ```
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Create a conversation holding only the greeting
    pub fn new() -> Self {
        let mut conversation = Self {
            turns: Vec::new(),
            next_id: 1,
        };
        conversation.push_assistant(GREETING);
        conversation
    }

    fn push(&mut self, sender: Sender, content: impl Into<String>) -> &ChatTurn {
        let id = self.next_id;
        self.next_id += 1;
        self.turns.push(ChatTurn {
            id,
            sender,
            content: content.into(),
            timestamp: timestamp(),
        });
        &self.turns[self.turns.len() - 1]
    }

    /// Append a user turn
    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(Sender::User, content)
    }

    /// Append an assistant turn
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(Sender::Assistant, content)
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when there are no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Reset to a single fresh greeting turn
    pub fn clear(&mut self) {
        self.turns.clear();
        self.push_assistant(GREETING);
    }

    /// Build request contents for a new chat input
    ///
    /// Prior turns become `user`/`model` contents in order; `input` follows,
    /// with the transcript attached when one is loaded.
    pub fn to_request_contents(&self, input: &str, transcript: Option<&str>) -> Vec<Content> {
        let mut contents: Vec<Content> = self
            .turns
            .iter()
            .map(|turn| match turn.sender {
                Sender::User => Content::user(turn.content.clone()),
                Sender::Assistant => Content::model(turn.content.clone()),
            })
            .collect();

        let text = match transcript {
            Some(transcript) => format!("{}\n\n[FILE_CONTENT]: {}", input, transcript),
            None => input.to_string(),
        };
        contents.push(Content::user(text));
        contents
    }
}
