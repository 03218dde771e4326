//! Locally persisted chat history.
//!
//! All conversations are stored as one JSON document. Conversations are
//! append-only apart from deletion; titles are derived on demand from the
//! first user message.

use std::sync::Arc;

use log::warn;
use uuid::Uuid;

use crate::{
    api::ChatTurn,
    clock::{Clock, SystemClock},
    error::{AquaError, Result},
    models::{ChatConversation, ChatMessage, ChatRole},
    store::KeyValueStore,
};

const CONVERSATIONS_KEY: &str = "chat_conversations";

/// Chat conversations on the device store.
pub struct ChatHistory<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> ChatHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All conversations, most recently updated first.
    ///
    /// A storage fault or unreadable document yields an empty list.
    pub async fn list(&self) -> Vec<ChatConversation> {
        let mut conversations = self.load().await;
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        conversations
    }

    pub async fn conversation(&self, id: &str) -> Option<ChatConversation> {
        self.load().await.into_iter().find(|c| c.id == id)
    }

    /// Builds a new, empty conversation without storing it.
    pub fn draft_conversation(&self) -> ChatConversation {
        let now = self.clock.now();
        ChatConversation {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Starts an empty conversation and returns it.
    pub async fn create_conversation(&self) -> Result<ChatConversation> {
        let conversation = self.draft_conversation();

        let mut conversations = self.load().await;
        conversations.push(conversation.clone());
        self.save(&conversations).await?;
        Ok(conversation)
    }

    /// Appends a user message and the assistant's reply to `conversation` and
    /// stores it in one write, inserting it if it is not stored yet.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when either text is blank, checked before anything is
    /// written; store errors are propagated.
    pub async fn record_exchange(
        &self,
        mut conversation: ChatConversation,
        question: &str,
        reply: &str,
    ) -> Result<ChatConversation> {
        if question.trim().is_empty() {
            return Err(AquaError::invalid_input("message").with_reason("Message cannot be empty"));
        }
        if reply.trim().is_empty() {
            return Err(AquaError::UnexpectedResponse {
                message: "assistant reply is empty".to_string(),
            });
        }

        let now = self.clock.now();
        for (role, content) in [(ChatRole::User, question), (ChatRole::Assistant, reply)] {
            conversation.messages.push(ChatMessage {
                role,
                content: content.trim().to_string(),
                timestamp: now,
            });
        }
        conversation.updated_at = now;

        let mut conversations = self.load().await;
        match conversations.iter_mut().find(|c| c.id == conversation.id) {
            Some(stored) => *stored = conversation.clone(),
            None => conversations.push(conversation.clone()),
        }
        self.save(&conversations).await?;
        Ok(conversation)
    }

    /// Appends a message to conversation `id` and returns the updated
    /// conversation.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank content or an unknown conversation; store
    /// errors are propagated.
    pub async fn add_message(
        &self,
        id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatConversation> {
        if content.trim().is_empty() {
            return Err(AquaError::invalid_input("message").with_reason("Message cannot be empty"));
        }

        let mut conversations = self.load().await;
        let conversation = conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                AquaError::invalid_input("conversation")
                    .with_reason(format!("Conversation '{id}' not found"))
            })?;

        let now = self.clock.now();
        conversation.messages.push(ChatMessage {
            role,
            content: content.to_string(),
            timestamp: now,
        });
        conversation.updated_at = now;
        let updated = conversation.clone();

        self.save(&conversations).await?;
        Ok(updated)
    }

    /// Removes conversation `id`. Returns whether it existed.
    pub async fn delete_conversation(&self, id: &str) -> Result<bool> {
        let mut conversations = self.load().await;
        let before = conversations.len();
        conversations.retain(|c| c.id != id);
        if conversations.len() == before {
            return Ok(false);
        }
        self.save(&conversations).await?;
        Ok(true)
    }

    /// Removes every conversation.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(CONVERSATIONS_KEY).await
    }

    async fn load(&self) -> Vec<ChatConversation> {
        let raw = match self.store.get(CONVERSATIONS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read chat history: {e}");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable chat history: {e}");
            Vec::new()
        })
    }

    async fn save(&self, conversations: &[ChatConversation]) -> Result<()> {
        let raw = serde_json::to_string(conversations)?;
        self.store.set(CONVERSATIONS_KEY, &raw).await
    }
}

/// History in the shape the assistant endpoint expects.
pub fn to_turns(conversation: &ChatConversation) -> Vec<ChatTurn> {
    conversation
        .messages
        .iter()
        .map(|m| ChatTurn {
            role: m.role,
            content: m.content.clone(),
        })
        .collect()
}
