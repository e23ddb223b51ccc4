//! In-memory SessionStore for tests and zero-setup runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{BotError, Result};

use super::{Session, SessionStore};

/// HashMap-backed store; clones on load so callers mutate a private copy.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: Mutex<HashMap<i64, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: i64) -> Result<Option<Session>> {
        let map = self
            .inner
            .lock()
            .map_err(|e| BotError::Store(e.to_string()))?;
        Ok(map.get(&chat_id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut map = self
            .inner
            .lock()
            .map_err(|e| BotError::Store(e.to_string()))?;
        map.insert(session.chat_id, session.clone());
        Ok(())
    }

    async fn clear(&self, chat_id: i64) -> Result<()> {
        let mut map = self
            .inner
            .lock()
            .map_err(|e| BotError::Store(e.to_string()))?;
        map.remove(&chat_id);
        Ok(())
    }
}
