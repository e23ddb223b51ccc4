//! Transcript audit log: every inbound update, one row each.
//!
//! Separate from the session record; operators use it to reconstruct what a
//! user did during a screening.

use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

use super::SqlitePoolManager;

/// One logged update.
#[derive(Debug, Clone)]
pub struct TranscriptRecord {
    pub id: String,
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    /// "text" or "callback".
    pub kind: String,
    /// The message text, or the encoded button action.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TranscriptRecord {
    pub fn new(
        chat_id: i64,
        user_id: i64,
        username: Option<String>,
        kind: String,
        content: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            chat_id,
            user_id,
            username,
            kind,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Persistence and queries for transcript records.
#[derive(Clone)]
pub struct TranscriptRepository {
    pool_manager: SqlitePoolManager,
}

impl TranscriptRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating transcript table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transcript (
                id TEXT PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                username TEXT,
                kind TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transcript_chat_id ON transcript(chat_id);
            CREATE INDEX IF NOT EXISTS idx_transcript_created_at ON transcript(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn save(&self, record: &TranscriptRecord) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO transcript (id, chat_id, user_id, username, kind, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(record.chat_id)
        .bind(record.user_id)
        .bind(&record.username)
        .bind(&record.kind)
        .bind(&record.content)
        .bind(record.created_at.to_rfc3339())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Most recent records for a chat, newest first.
    pub async fn recent_for_chat(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<TranscriptRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let rows = sqlx::query(
            r#"
            SELECT id, chat_id, user_id, username, kind, content, created_at
            FROM transcript
            WHERE chat_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<TranscriptRecord, sqlx::Error> {
    let created_at_str: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(TranscriptRecord {
        id: row.try_get("id")?,
        chat_id: row.try_get("chat_id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        kind: row.try_get("kind")?,
        content: row.try_get("content")?,
        created_at,
    })
}
