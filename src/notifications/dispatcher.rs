use crate::domain::{Submission, SubmitterEmail};
use crate::email::Email;
use crate::notifications::{
    admin_alert, customer_acknowledgment, DispatchFailure, DispatchReport, EmailMessage, Notifier,
    NotificationPreferences, RecipientClass,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Sends notifications straight through the email provider.
pub struct NotificationDispatcher {
    email_client: Arc<dyn Email>,
}

struct SendOutcome {
    class: RecipientClass,
    result: Result<bool, String>,
}

impl NotificationDispatcher {
    pub fn new(email_client: Arc<dyn Email>) -> Self {
        Self { email_client }
    }

    async fn send(
        &self,
        class: RecipientClass,
        recipients: Vec<String>,
        message: EmailMessage,
    ) -> SendOutcome {
        let redirected = !self.email_client.supports_arbitrary_recipients();
        let (recipients, subject) = if redirected {
            let subject = format!(
                "[Test mode, for {}] {}",
                recipients.join(", "),
                message.subject
            );
            (vec![self.email_client.sandbox_recipient().to_string()], subject)
        } else {
            (recipients, message.subject)
        };
        let result = self
            .email_client
            .send_email(&recipients, &subject, &message.html, &message.text)
            .await
            .map(|receipt| {
                tracing::info!(
                    recipient_class = ?class,
                    message_id = receipt.message_id.as_deref().unwrap_or("unknown"),
                    "Notification accepted by the email provider"
                );
                redirected || receipt.sandboxed
            })
            .map_err(|e| {
                tracing::warn!(
                    recipient_class = ?class,
                    error.cause_chain = ?e,
                    "Failed to send notification"
                );
                format!("{:#}", e)
            });
        SendOutcome { class, result }
    }
}

#[async_trait]
impl Notifier for NotificationDispatcher {
    #[tracing::instrument(
        name = "Dispatch submission notifications",
        skip(self, submission, preferences),
        fields(
            submission_id = %submission.id(),
            kind = submission.kind().as_str(),
            admin_recipients = preferences.admin_emails.len()
        )
    )]
    async fn dispatch(
        &self,
        submission: &Submission,
        preferences: &NotificationPreferences,
    ) -> DispatchReport {
        if !preferences.enabled {
            tracing::info!("Notifications are disabled, nothing sent");
            return DispatchReport::disabled();
        }
        let admin_recipients = valid_admin_recipients(&preferences.admin_emails);

        let customer = self.send(
            RecipientClass::Customer,
            vec![submission.email().to_string()],
            customer_acknowledgment(submission),
        );
        let admin = async {
            if admin_recipients.is_empty() {
                tracing::info!("No admin recipients configured, skipping admin alert");
                None
            } else {
                Some(
                    self.send(RecipientClass::Admin, admin_recipients, admin_alert(submission))
                        .await,
                )
            }
        };
        let (customer, admin) = tokio::join!(customer, admin);

        let mut report = DispatchReport {
            success: false,
            sent: 0,
            errors: vec![],
            test_mode: false,
            disabled: false,
            admin_skipped: admin.is_none(),
        };
        for outcome in std::iter::once(customer).chain(admin) {
            match outcome.result {
                Ok(sandboxed) => {
                    report.sent += 1;
                    report.test_mode |= sandboxed;
                }
                Err(message) => report.errors.push(DispatchFailure {
                    recipient_class: outcome.class,
                    message,
                }),
            }
        }
        report.success = report.sent > 0;
        if report.test_mode {
            tracing::warn!("Email provider is in test mode, recipients were sandboxed");
        }
        report
    }
}

fn valid_admin_recipients(raw: &[String]) -> Vec<String> {
    raw.iter()
        .filter_map(|email| match SubmitterEmail::parse(email.clone()) {
            Ok(email) => Some(email.as_ref().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid admin recipient");
                None
            }
        })
        .collect()
}
