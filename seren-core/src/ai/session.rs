//! Conversation session
//!
//! Owns the bounded rolling chat history, feeds it to the reply engine,
//! and persists the transcript after every change. Taking `&mut self` on
//! [`ChatSession::send`] serializes sends, so reply N always pairs with
//! request N.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::BlobStore;
use crate::types::{ChatMessage, ChatRole};

use super::engine::{Reply, ReplyEngine};

/// Maximum stored messages (5 exchanges); oldest are evicted first.
pub const HISTORY_CAP: usize = 10;

/// Blob key for the serialized chat history.
pub const CHAT_KEY: &str = "chat_history";

/// A chat session bound to one reply engine and one persistence handle.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    engine: ReplyEngine,
    blobs: Arc<BlobStore>,
}

impl ChatSession {
    /// Load the persisted transcript; corrupt blobs start an empty session.
    pub fn load(engine: ReplyEngine, blobs: Arc<BlobStore>) -> Self {
        let messages = match blobs.get(CHAT_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<ChatMessage>>(&json) {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt chat blob, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read chat blob, starting empty");
                Vec::new()
            }
        };

        Self {
            messages,
            engine,
            blobs,
        }
    }

    /// Send a user message and append the resolved assistant reply.
    ///
    /// The engine sees the history as it was before this user message; the
    /// returned [`Reply`] carries the degradation advisory for the UI.
    pub async fn send(&mut self, text: &str) -> Result<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation("message must not be empty".to_string()));
        }

        let reply = self.engine.generate(text, &self.messages).await;

        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.messages
            .push(ChatMessage::new(ChatRole::Assistant, reply.text.clone()));

        // FIFO eviction once the cap is exceeded
        if self.messages.len() > HISTORY_CAP {
            let excess = self.messages.len() - HISTORY_CAP;
            self.messages.drain(0..excess);
        }

        self.persist();
        Ok(reply)
    }

    /// Read-only snapshot of the transcript.
    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Empty the transcript (explicit user action).
    pub fn clear(&mut self) {
        self.messages.clear();
        if let Err(e) = self.blobs.remove(CHAT_KEY) {
            tracing::warn!(error = %e, "Failed to clear chat blob");
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.messages) {
            Ok(json) => {
                if let Err(e) = self.blobs.set(CHAT_KEY, &json) {
                    tracing::warn!(error = %e, "Failed to persist chat history");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode chat history"),
        }
    }
}
