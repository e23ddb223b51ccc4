//! Report delivery: Mailer trait plus the SMTP implementation.

pub mod smtp;

use async_trait::async_trait;

use crate::core::Result;

pub use smtp::SmtpMailer;

/// Sends one report email. The body is Markdown; implementations decide how
/// to render it for their channel.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, markdown_body: &str) -> Result<()>;
}

/// Renders Markdown to an HTML fragment for the email's HTML part.
pub fn render_markdown(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new(markdown);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}
