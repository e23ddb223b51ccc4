//! Session store trait: the one key-value surface of the system.

use async_trait::async_trait;

use crate::core::Result;

use super::Session;

/// Keyed by chat id. `save` overwrites the whole record (no partial updates);
/// concurrent saves for the same chat last-write-win, which is accepted.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, chat_id: i64) -> Result<Option<Session>>;
    async fn save(&self, session: &Session) -> Result<()>;
    async fn clear(&self, chat_id: i64) -> Result<()>;
}
