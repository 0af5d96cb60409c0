mod ses_email_client;

use async_trait::async_trait;
pub use ses_email_client::SesEmailClient;

/// What the provider said about an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: Option<String>,
    /// The provider delivered to its sandbox address instead of the
    /// requested recipients.
    pub sandboxed: bool,
}

#[async_trait]
pub trait Email: Send + Sync {
    async fn send_email(
        &self,
        recipients: &[String],
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<DeliveryReceipt, anyhow::Error>;

    /// `false` while the sending domain is unverified: the provider will
    /// only deliver to `sandbox_recipient`.
    fn supports_arbitrary_recipients(&self) -> bool;

    fn sandbox_recipient(&self) -> &str;
}
