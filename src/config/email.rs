//! Email config: SMTP endpoint, credentials, sender and recipients.

use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP_SERVER
    pub smtp_server: String,
    /// SMTP_PORT
    pub smtp_port: u16,
    /// SMTP_LOGIN
    pub smtp_login: String,
    /// SMTP_PASSWORD
    pub smtp_password: String,
    /// FROM_EMAIL
    pub from_email: String,
    /// Display name on outgoing mail
    pub from_name: String,
    /// TO_EMAIL: comma-separated recipient list
    pub to_emails: Vec<String>,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self> {
        let smtp_server = env::var("SMTP_SERVER")
            .map_err(|_| anyhow::anyhow!("SMTP_SERVER not set"))?;
        let smtp_port = env::var("SMTP_PORT")
            .map_err(|_| anyhow::anyhow!("SMTP_PORT not set"))?
            .parse()
            .map_err(|_| anyhow::anyhow!("SMTP_PORT is not a number"))?;
        let smtp_login = env::var("SMTP_LOGIN")
            .map_err(|_| anyhow::anyhow!("SMTP_LOGIN not set"))?;
        let smtp_password = env::var("SMTP_PASSWORD")
            .map_err(|_| anyhow::anyhow!("SMTP_PASSWORD not set"))?;
        let from_email = env::var("FROM_EMAIL")
            .map_err(|_| anyhow::anyhow!("FROM_EMAIL not set"))?;
        let from_name =
            env::var("FROM_NAME").unwrap_or_else(|_| "Milestones Bot".to_string());
        let to_emails = env::var("TO_EMAIL")
            .map_err(|_| anyhow::anyhow!("TO_EMAIL not set"))?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_login,
            smtp_password,
            from_email,
            from_name,
            to_emails,
        })
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.smtp_server.is_empty(), "SMTP_SERVER is empty");
        anyhow::ensure!(self.smtp_port != 0, "SMTP_PORT must be non-zero");
        anyhow::ensure!(!self.to_emails.is_empty(), "TO_EMAIL has no recipients");
        anyhow::ensure!(
            self.from_email.contains('@'),
            "FROM_EMAIL is not an email address: {}",
            self.from_email
        );
        Ok(())
    }

    /// `Name <address>` form used on the From header.
    pub fn from_address(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}
