//! Core: error types, logging, transport-agnostic types, and the outbound Bot trait.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Button, CallbackAction, Chat, Handler, HandlerResponse, Keyboard, Update, UpdateKind, User,
};
