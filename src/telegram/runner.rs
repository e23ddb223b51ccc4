//! Dispatcher runner: converts teloxide updates to core updates and passes
//! them to the HandlerChain. Long polling by default; a configured webhook URL
//! switches to the transport's own webhook listener.

use anyhow::Result;
use teloxide::{
    dispatching::UpdateFilterExt,
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{CallbackQuery, Message as TgMessage, Update as TgUpdate},
    update_listeners::webhooks,
};
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Webhook settings: public URL the transport posts to + local listen address.
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub url: reqwest::Url,
    pub addr: std::net::SocketAddr,
}

/// Starts the dispatcher with message and callback-query branches. Each update
/// is handed to the chain in a spawned task so the dispatcher returns to the
/// transport immediately.
#[instrument(skip(bot, handler_chain, webhook))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    webhook: Option<WebhookSettings>,
) -> Result<()> {
    let handler = dptree::entry()
        .branch(TgUpdate::filter_message().endpoint(on_message))
        .branch(TgUpdate::filter_callback_query().endpoint(on_callback_query));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build();

    match webhook {
        Some(settings) => {
            info!(url = %settings.url, addr = %settings.addr, "Starting webhook listener");
            let listener = webhooks::axum(bot, webhooks::Options::new(settings.addr, settings.url))
                .await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Starting long polling");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}

async fn on_message(msg: TgMessage, chain: HandlerChain) -> ResponseResult<()> {
    let Some(update) = TelegramMessageWrapper(&msg).to_core() else {
        info!(chat_id = msg.chat.id.0, "Ignoring non-text message");
        return Ok(());
    };

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&update).await {
            error!(error = %e, user_id = update.user.id, "Handler chain failed");
        }
    });

    Ok(())
}

async fn on_callback_query(
    bot: teloxide::Bot,
    q: CallbackQuery,
    chain: HandlerChain,
) -> ResponseResult<()> {
    // ack first so the button stops spinning even if handling fails
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(update) = TelegramCallbackWrapper(&q).to_core() else {
        info!(user_id = q.from.id.0, "Ignoring callback with unknown data");
        return Ok(());
    };

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&update).await {
            error!(error = %e, user_id = update.user.id, "Handler chain failed");
        }
    });

    Ok(())
}
