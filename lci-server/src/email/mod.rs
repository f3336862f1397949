//! Outbound customer email

pub mod templates;

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

pub use templates::{InquiryConfirmation, OrderUpdateNotice};

/// Rendered email ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
#[error("email delivery failed: {0}")]
pub struct MailError(pub String);

/// Email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Amazon SES transport
pub struct SesMailer {
    ses: SesClient,
    from: String,
}

impl SesMailer {
    pub fn new(ses: SesClient, from: impl Into<String>) -> Self {
        Self {
            ses,
            from: from.into(),
        }
    }

    /// Build from the default AWS config chain; `SES_REGION` overrides the region.
    pub async fn from_env(from: impl Into<String>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = if let Ok(ses_region) = std::env::var("SES_REGION") {
            let ses_config = aws_config
                .to_builder()
                .region(aws_config::Region::new(ses_region))
                .build();
            SesClient::new(&ses_config)
        } else {
            SesClient::new(&aws_config)
        };
        Self::new(ses, from)
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let content = |data: &str| {
            Content::builder()
                .data(data)
                .charset("UTF-8")
                .build()
                .map_err(|e| MailError(e.to_string()))
        };

        let body = Body::builder()
            .html(content(&email.html)?)
            .text(content(&email.text)?)
            .build();
        let message = Message::builder()
            .subject(content(&email.subject)?)
            .body(body)
            .build();

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| MailError(e.to_string()))?;

        tracing::info!(subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Logs instead of sending (development)
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            subject = %email.subject,
            "Email delivery disabled, not sending"
        );
        tracing::debug!(body = %email.text, "Suppressed email body");
        Ok(())
    }
}
