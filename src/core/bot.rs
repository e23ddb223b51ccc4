//! Outbound bot abstraction. Production code sends via the Telegram adapter; tests substitute a recording mock.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, Keyboard};

/// Outbound messaging surface used by the flow.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends plain text.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends Markdown content. The adapter escapes and splits as its transport requires.
    async fn send_markdown(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends text with an inline keyboard; returns the sent message id so the keyboard can be edited later.
    async fn send_with_keyboard(&self, chat: &Chat, text: &str, keyboard: &Keyboard)
        -> Result<String>;

    /// Replaces the inline keyboard of a previously sent message.
    async fn edit_keyboard(&self, chat: &Chat, message_id: &str, keyboard: &Keyboard)
        -> Result<()>;
}
