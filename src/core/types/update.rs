//! Inbound update model: one text message or one button press.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{action::CallbackAction, chat::Chat, user::User};

/// Payload of an inbound update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UpdateKind {
    /// A plain text message.
    Text(String),
    /// An inline-button press. `message_id` is the message carrying the keyboard,
    /// needed to edit that keyboard in place.
    Callback {
        action: CallbackAction,
        message_id: Option<String>,
    },
}

/// A single inbound event with user, chat, and payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub kind: UpdateKind,
    pub created_at: DateTime<Utc>,
}

impl Update {
    /// Text content, if this is a text update.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::Text(text) => Some(text),
            UpdateKind::Callback { .. } => None,
        }
    }

    /// Short kind label for logging and transcript records.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            UpdateKind::Text(_) => "text",
            UpdateKind::Callback { .. } => "callback",
        }
    }

    /// Transcript content: the text, or the encoded callback action.
    pub fn content(&self) -> String {
        match &self.kind {
            UpdateKind::Text(text) => text.clone(),
            UpdateKind::Callback { action, .. } => action.encode(),
        }
    }
}
