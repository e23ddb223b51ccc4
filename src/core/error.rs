//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error (session store, transport, LLM, email, content, handler, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Content error: {0}")]
    Content(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by handlers (no text, unknown button action, missing session, bad step).
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in update")]
    NoText,

    #[error("Unknown callback action: {0}")]
    UnknownAction(String),

    #[error("No session for chat")]
    MissingSession,

    #[error("State error: {0}")]
    State(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
