//! Handler that logs every inbound update in before().

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Handler, Result, Update};

/// Structured per-update log line; always continues.
#[derive(Clone, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        info!(
            user_id = update.user.id,
            chat_id = update.chat.id,
            update_id = %update.id,
            kind = %update.kind_name(),
            content = %update.content(),
            "Received update"
        );
        Ok(true)
    }
}
