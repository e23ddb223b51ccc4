//! SMTP mailer: multipart plain+HTML mail over STARTTLS.

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, instrument};

use crate::config::EmailConfig;
use crate::core::{BotError, Result};

use super::{render_markdown, Mailer};

/// Mailer over a configured SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &EmailConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_login.clone(),
                config.smtp_password.clone(),
            ))
            .build();
        let from: Mailbox = config
            .from_address()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid FROM_EMAIL: {}", e))?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, subject, markdown_body))]
    async fn send(&self, to: &str, subject: &str, markdown_body: &str) -> Result<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| BotError::Email(format!("invalid recipient {}: {}", to, e)))?;

        let html = render_markdown(markdown_body);
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                markdown_body.to_string(),
                html,
            ))
            .map_err(|e| BotError::Email(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| BotError::Email(e.to_string()))?;

        info!(to = %to, "Report email sent");
        Ok(())
    }
}
