//! Handler that runs the intake wizard. All flow failures land here: they are
//! logged and reported to the end user as one generic error message, with no
//! retry and no transient/permanent distinction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, instrument};

use crate::core::{Bot, Handler, HandlerResponse, Result, Update};
use crate::flow::IntakeFlow;

const GENERIC_ERROR: &str = "An error occurred. Please try again later.";

/// Wraps [`IntakeFlow`]; the chain's terminal handler.
pub struct IntakeHandler {
    flow: Arc<IntakeFlow>,
    bot: Arc<dyn Bot>,
}

impl IntakeHandler {
    pub fn new(flow: Arc<IntakeFlow>, bot: Arc<dyn Bot>) -> Self {
        Self { flow, bot }
    }
}

#[async_trait]
impl Handler for IntakeHandler {
    #[instrument(skip(self, update))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        if let Err(e) = self.flow.handle(update).await {
            error!(
                error = %e,
                user_id = update.user.id,
                chat_id = update.chat.id,
                "Intake flow failed"
            );
            if let Err(send_err) = self.bot.send_message(&update.chat, GENERIC_ERROR).await {
                error!(error = %send_err, chat_id = update.chat.id, "Failed to send error message");
            }
        }
        Ok(HandlerResponse::Stop)
    }
}
