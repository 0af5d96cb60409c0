use crate::configuration::EmailClientSettings;
use crate::domain::SubmitterEmail;
use crate::email::{DeliveryReceipt, Email};
use anyhow::Context;
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

pub struct SesEmailClient {
    ses_client: ses::Client,
    sender: SubmitterEmail,
    verified_domain: bool,
    sandbox_recipient: String,
}

impl SesEmailClient {
    pub async fn new(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender = settings
            .sender()
            .map_err(anyhow::Error::msg)
            .context("Invalid sender email address.")?;
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(settings.timeout())
            .build();
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(timeout_config)
            .load()
            .await;
        Ok(Self::from_parts(
            ses::Client::new(&shared_config),
            sender,
            settings.verified_domain,
            settings.sandbox_recipient.clone(),
        ))
    }

    pub fn from_parts(
        ses_client: ses::Client,
        sender: SubmitterEmail,
        verified_domain: bool,
        sandbox_recipient: String,
    ) -> Self {
        Self {
            ses_client,
            sender,
            verified_domain,
            sandbox_recipient,
        }
    }
}

fn utf8(data: &str) -> Result<Content, anyhow::Error> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .context("Failed to build email content.")
}

#[async_trait]
impl Email for SesEmailClient {
    #[tracing::instrument(
        name = "Send email through SES",
        skip(self, html_content, text_content),
        fields(sender = %self.sender)
    )]
    async fn send_email(
        &self,
        recipients: &[String],
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<DeliveryReceipt, anyhow::Error> {
        let body = Body::builder()
            .html(utf8(html_content)?)
            .text(utf8(text_content)?)
            .build();
        let message = Message::builder()
            .subject(utf8(subject)?)
            .body(body)
            .build()
            .context("Failed to build email message.")?;
        let content = EmailContent::builder().simple(message).build();
        let destination = Destination::builder()
            .set_to_addresses(Some(recipients.to_vec()))
            .build();

        let output = self
            .ses_client
            .send_email()
            .from_email_address(self.sender.as_ref())
            .destination(destination)
            .content(content)
            .send()
            .await
            .context("SES refused the message.")?;
        // SES never reports sandbox delivery per message. Test mode comes
        // from `supports_arbitrary_recipients` alone.
        Ok(DeliveryReceipt {
            message_id: output.message_id().map(String::from),
            sandboxed: false,
        })
    }

    fn supports_arbitrary_recipients(&self) -> bool {
        self.verified_domain
    }

    fn sandbox_recipient(&self) -> &str {
        &self.sandbox_recipient
    }
}
