//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code
//! sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use teloxide::{
    payloads::{EditMessageReplyMarkupSetters, SendMessageSetters},
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode},
};

use crate::core::{Bot as CoreBot, BotError, Chat, Keyboard, Result};

use super::text::{escape_markdown_v2, split_message, TELEGRAM_MESSAGE_LIMIT};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
        let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| {
                        InlineKeyboardButton::callback(
                            button.label.clone(),
                            button.action.encode(),
                        )
                    })
                    .collect()
            })
            .collect();
        InlineKeyboardMarkup::new(rows)
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        for part in split_message(text, TELEGRAM_MESSAGE_LIMIT) {
            self.bot
                .send_message(ChatId(chat.id), part)
                .await
                .map_err(|e| BotError::Transport(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_markdown(&self, chat: &Chat, text: &str) -> Result<()> {
        let escaped = escape_markdown_v2(text);
        for part in split_message(&escaped, TELEGRAM_MESSAGE_LIMIT) {
            self.bot
                .send_message(ChatId(chat.id), part)
                .parse_mode(ParseMode::MarkdownV2)
                .await
                .map_err(|e| BotError::Transport(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(Self::to_markup(keyboard))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_keyboard(
        &self,
        chat: &Chat,
        message_id: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        let id: i32 = message_id.parse().map_err(|_| {
            BotError::Transport(format!("Invalid message_id for edit: {}", message_id))
        })?;
        self.bot
            .edit_message_reply_markup(ChatId(chat.id), MessageId(id))
            .reply_markup(Self::to_markup(keyboard))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}
