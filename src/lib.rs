//! # Milestones screening bot
//!
//! Conversational intake over Telegram: collect a child's name and age,
//! present the age bucket's developmental-milestone checklist, estimate the
//! developmental age and generate recommendations through an LLM, and email a
//! report. Core (Update, Handler, Bot), chain (HandlerChain), and telegram
//! (dispatcher, adapters) follow the layered layout; the wizard itself lives
//! in `flow`.

pub mod assessment;
pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod content;
pub mod core;
pub mod email;
pub mod flow;
pub mod handlers;
pub mod llm;
pub mod report;
pub mod runner;
pub mod session;
pub mod storage;
pub mod telegram;

// Re-export CLI
pub use cli::{load_config, Cli, Commands};

// Re-export core
pub use crate::core::{
    init_tracing, Bot, BotError, Button, CallbackAction, Chat, Handler, HandlerError,
    HandlerResponse, Keyboard, Result, Update, UpdateKind, User,
};

// Re-export chain
pub use chain::HandlerChain;

// Re-export telegram
pub use telegram::{
    escape_markdown_v2, run_dispatcher, split_message, TelegramBotAdapter, WebhookSettings,
    TELEGRAM_MESSAGE_LIMIT,
};

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use content::ContentLibrary;
pub use flow::IntakeFlow;
pub use handlers::{IntakeHandler, LoggingHandler, TranscriptHandler};
pub use runner::run_bot;
pub use session::{InMemorySessionStore, Session, SessionStore, SqliteSessionStore, Step};
