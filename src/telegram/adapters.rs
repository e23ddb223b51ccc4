//! Conversion from teloxide update types to the core model.

use chrono::Utc;

use crate::core::{CallbackAction, Chat, Update, UpdateKind, User};

/// Telegram user → core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl TelegramUserWrapper<'_> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message → core text update. `None` for non-text messages,
/// which this bot ignores.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl TelegramMessageWrapper<'_> {
    pub fn to_core(&self) -> Option<Update> {
        let text = self.0.text()?;
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(|| User {
                id: 0,
                username: None,
                first_name: None,
                last_name: None,
            });

        Some(Update {
            id: self.0.id.to_string(),
            user,
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            kind: UpdateKind::Text(text.to_string()),
            created_at: Utc::now(),
        })
    }
}

/// Telegram callback query → core callback update. `None` when the query
/// carries no data, unknown data, or no originating message to route by.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl TelegramCallbackWrapper<'_> {
    pub fn to_core(&self) -> Option<Update> {
        let action = CallbackAction::parse(self.0.data.as_deref()?)?;
        let message = self.0.message.as_ref()?;
        let message_id = message.id().to_string();
        let chat = message.chat();

        Some(Update {
            id: message_id.clone(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat: Chat {
                id: chat.id.0,
                chat_type: format!("{:?}", chat.kind),
            },
            kind: UpdateKind::Callback {
                action,
                message_id: Some(message_id),
            },
            created_at: Utc::now(),
        })
    }
}
