//! SQLite implementation of the SessionStore trait.
//!
//! One row per chat; the record is serialized to a JSON state column and
//! replaced wholesale on every save.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::core::{BotError, Result};
use crate::storage::SqlitePoolManager;

use super::{Session, SessionStore};

/// SQLite-backed session store sharing the app's pool.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Creates the store on the given pool and initializes the schema.
    pub async fn new(pool_manager: &SqlitePoolManager) -> std::result::Result<Self, sqlx::Error> {
        let store = Self {
            pool: pool_manager.pool().clone(),
        };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> std::result::Result<(), sqlx::Error> {
        info!("Creating sessions table if not exists");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                chat_id INTEGER PRIMARY KEY,
                state TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, chat_id: i64) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT state FROM sessions WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BotError::Store(e.to_string()))?;

        match row {
            None => Ok(None),
            Some(row) => {
                let state: String = row
                    .try_get("state")
                    .map_err(|e| BotError::Store(e.to_string()))?;
                let session = serde_json::from_str(&state)
                    .map_err(|e| BotError::Store(format!("corrupt session state: {}", e)))?;
                Ok(Some(session))
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let state = serde_json::to_string(session)
            .map_err(|e| BotError::Store(e.to_string()))?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sessions (chat_id, state, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(session.chat_id)
        .bind(state)
        .bind(session.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| BotError::Store(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self, chat_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE chat_id = ?")
            .bind(chat_id)
            .execute(&self.pool)
            .await
            .map_err(|e| BotError::Store(e.to_string()))?;
        Ok(())
    }
}
