use crate::domain::Submission;
use crate::notifications::{DispatchReport, NotificationPreferences, NotificationRequest, Notifier};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Delegates dispatch to the HTTP notification endpoints
/// (`POST {base}/notifications/{lead|booking}`).
pub struct RemoteNotifier {
    http_client: reqwest::Client,
    base_url: String,
}

impl RemoteNotifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the notification HTTP client.")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, submission: &Submission) -> String {
        format!(
            "{}/notifications/{}",
            self.base_url,
            submission.kind().as_str()
        )
    }

    async fn post(
        &self,
        submission: &Submission,
        preferences: &NotificationPreferences,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let request = self.http_client.post(self.endpoint(submission));
        let request = match submission {
            Submission::Lead(lead) => request.json(&NotificationRequest {
                record: lead,
                admin_emails: preferences.admin_emails.clone(),
                enabled: preferences.enabled,
            }),
            Submission::Booking(booking) => request.json(&NotificationRequest {
                record: booking,
                admin_emails: preferences.admin_emails.clone(),
                enabled: preferences.enabled,
            }),
        };
        let response = request.send().await?;
        let status = response.status();
        Ok((status, response.text().await?))
    }
}

#[async_trait]
impl Notifier for RemoteNotifier {
    #[tracing::instrument(
        name = "Dispatch notifications through the HTTP endpoint",
        skip(self, submission, preferences),
        fields(submission_id = %submission.id())
    )]
    async fn dispatch(
        &self,
        submission: &Submission,
        preferences: &NotificationPreferences,
    ) -> DispatchReport {
        match self.post(submission, preferences).await {
            Ok((status, body)) => report_from_response(status, &body),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Notification endpoint unreachable");
                DispatchReport::failed(format!("Notification endpoint unreachable: {}", e))
            }
        }
    }
}

/// Any non-2xx answer counts as a full dispatch failure.
pub(crate) fn report_from_response(status: StatusCode, body: &str) -> DispatchReport {
    if !status.is_success() {
        tracing::warn!(%status, "Notification endpoint returned an error status");
        return DispatchReport::failed(format!("Notification endpoint returned {}", status));
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Notification endpoint returned an unreadable report");
        DispatchReport::failed("Notification endpoint returned an unreadable report")
    })
}
