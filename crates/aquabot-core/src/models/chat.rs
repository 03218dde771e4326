//! Chat conversation models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Title used until the conversation has a user message.
pub const UNTITLED_CONVERSATION: &str = "New conversation";

const TITLE_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: Timestamp,
}

/// A locally persisted conversation with the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatConversation {
    /// Client-generated identifier
    pub id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ChatConversation {
    /// Title derived from the first user message.
    pub fn title(&self) -> String {
        let Some(first) = self
            .messages
            .iter()
            .find(|message| message.role == ChatRole::User)
        else {
            return UNTITLED_CONVERSATION.to_string();
        };

        let text = first.content.trim();
        if text.is_empty() {
            UNTITLED_CONVERSATION.to_string()
        } else if text.chars().count() > TITLE_MAX_CHARS {
            let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
            format!("{}...", truncated.trim_end())
        } else {
            text.to_string()
        }
    }
}
