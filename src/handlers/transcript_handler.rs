//! Handler that persists each inbound update to the transcript log in before().

use async_trait::async_trait;
use tracing::{error, instrument};

use crate::core::{BotError, Handler, Result, Update};
use crate::storage::{TranscriptRecord, TranscriptRepository};

/// Saves each inbound update to the given [`TranscriptRepository`]; always continues.
#[derive(Clone)]
pub struct TranscriptHandler {
    repo: TranscriptRepository,
}

impl TranscriptHandler {
    pub fn new(repo: TranscriptRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Handler for TranscriptHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let record = TranscriptRecord::new(
            update.chat.id,
            update.user.id,
            update.user.username.clone(),
            update.kind_name().to_string(),
            update.content(),
        );

        self.repo.save(&record).await.map_err(|e| {
            error!(error = %e, user_id = update.user.id, "Failed to save transcript record");
            BotError::Store(e.to_string())
        })?;

        Ok(true)
    }
}
