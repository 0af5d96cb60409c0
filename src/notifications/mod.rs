//! Customer acknowledgments and admin alerts for new submissions.
//!
//! Dispatch is best-effort and fire-once: problems are folded into a
//! [`DispatchReport`] instead of being returned as errors, because the
//! stored record is what counts.

mod dispatcher;
mod remote;
mod templates;

pub use dispatcher::NotificationDispatcher;
pub use remote::RemoteNotifier;
pub use templates::{admin_alert, customer_acknowledgment, EmailMessage};

use crate::domain::Submission;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ops::Not;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(
        &self,
        submission: &Submission,
        preferences: &NotificationPreferences,
    ) -> DispatchReport;
}

/// Staff-editable switches, read fresh before every dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub enabled: bool,
    pub admin_emails: Vec<String>,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_emails: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientClass {
    Customer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchFailure {
    pub recipient_class: RecipientClass,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    /// At least one send went through, or notifications are disabled.
    pub success: bool,
    pub sent: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DispatchFailure>,
    /// Mail went to the provider's sandbox address, not the real recipient.
    #[serde(default, skip_serializing_if = "Not::not")]
    pub test_mode: bool,
    #[serde(default, skip_serializing_if = "Not::not")]
    pub disabled: bool,
    /// No admin recipients were configured, so no alert was attempted.
    #[serde(default, skip_serializing_if = "Not::not")]
    pub admin_skipped: bool,
}

impl DispatchReport {
    pub fn disabled() -> Self {
        Self {
            success: true,
            sent: 0,
            errors: vec![],
            test_mode: false,
            disabled: true,
            admin_skipped: false,
        }
    }

    /// Nothing could be confirmed for either recipient class.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            sent: 0,
            errors: vec![
                DispatchFailure {
                    recipient_class: RecipientClass::Customer,
                    message: message.clone(),
                },
                DispatchFailure {
                    recipient_class: RecipientClass::Admin,
                    message,
                },
            ],
            test_mode: false,
            disabled: false,
            admin_skipped: false,
        }
    }

    pub fn failed_for(&self, class: RecipientClass) -> bool {
        self.errors.iter().any(|e| e.recipient_class == class)
    }
}

/// JSON body of the HTTP notification endpoints: the record's own fields
/// plus the admin recipients and the enabled switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(default)]
    pub admin_emails: Vec<String>,
    pub enabled: bool,
}

impl<T> NotificationRequest<T> {
    pub fn preferences(&self) -> NotificationPreferences {
        NotificationPreferences {
            enabled: self.enabled,
            admin_emails: self.admin_emails.clone(),
        }
    }
}
