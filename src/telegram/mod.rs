//! Telegram transport: adapters to/from the core model, the Bot impl, and the
//! dispatcher runner.

pub mod adapters;
pub mod bot_adapter;
pub mod runner;
pub mod text;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::{run_dispatcher, WebhookSettings};
pub use text::{escape_markdown_v2, split_message, TELEGRAM_MESSAGE_LIMIT};
