//! The submission pipeline: validate, store the attachment, persist, then
//! notify.
//!
//! Every step before persistence can abort the submission. Once a record
//! exists, nothing that happens afterwards can take it back: dispatch
//! problems end up in the returned [`DispatchReport`].

use crate::airports::AirportDirectory;
use crate::attachments::{AttachmentHandler, StorageRef, UploadError};
use crate::domain::{
    BookingPayload, FieldErrors, LeadPayload, Status, Submission, SubmissionKind,
};
use crate::notifications::{DispatchReport, Notifier};
use crate::repository::{PersistenceError, PreferencesStore, SubmissionStore};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("The submission is invalid.")]
    Validation(FieldErrors),
    #[error(transparent)]
    Attachment(#[from] UploadError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// The request itself could not be read.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::routes::error_chain_fmt(self, f)
    }
}

/// What the submitter gets back once the record is stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub kind: SubmissionKind,
    pub status: Status,
    pub notifications: DispatchReport,
}

/// The westernmost offset in civil use (UTC-12).
const WESTERNMOST_OFFSET_SECONDS: i32 = 12 * 3600;

/// The earliest calendar date still current somewhere on Earth.
///
/// Departure dates are only "in the past" once they have ended in every
/// timezone, so a submitter late in the evening west of UTC can still book
/// same-day travel.
pub fn earliest_current_date(now: DateTime<Utc>) -> NaiveDate {
    match FixedOffset::west_opt(WESTERNMOST_OFFSET_SECONDS) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.date_naive(),
    }
}

pub struct IntakePipeline {
    airports: Arc<AirportDirectory>,
    attachments: AttachmentHandler,
    submissions: Arc<dyn SubmissionStore>,
    preferences: Arc<dyn PreferencesStore>,
    notifier: Arc<dyn Notifier>,
    minimum_miles: u64,
    dispatch_timeout: Duration,
}

impl IntakePipeline {
    pub fn new(
        airports: Arc<AirportDirectory>,
        attachments: AttachmentHandler,
        submissions: Arc<dyn SubmissionStore>,
        preferences: Arc<dyn PreferencesStore>,
        notifier: Arc<dyn Notifier>,
        minimum_miles: u64,
        dispatch_timeout: Duration,
    ) -> Self {
        Self {
            airports,
            attachments,
            submissions,
            preferences,
            notifier,
            minimum_miles,
            dispatch_timeout,
        }
    }

    #[tracing::instrument(
        name = "Submit a miles lead",
        skip(self, payload),
        fields(submitter_email = %payload.email)
    )]
    pub async fn submit_lead(
        &self,
        payload: LeadPayload,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let lead = payload
            .validate(self.minimum_miles)
            .map_err(SubmissionError::Validation)?;
        let lead = self.submissions.create_lead(&lead).await?;
        tracing::info!(lead_id = %lead.id, "Lead stored");
        Ok(self.notify(Submission::Lead(lead)).await)
    }

    #[tracing::instrument(
        name = "Submit a reward flight booking",
        skip(self, payload),
        fields(submitter_email = %payload.email)
    )]
    pub async fn submit_booking(
        &self,
        payload: BookingPayload,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let today = earliest_current_date(Utc::now());
        let mut booking = payload
            .validate(today, self.airports.as_ref())
            .map_err(SubmissionError::Validation)?;
        let screenshot: Option<StorageRef> = match booking.screenshot.take() {
            Some(attachment) => Some(self.attachments.store(attachment).await?),
            None => None,
        };
        let booking = self
            .submissions
            .create_booking(&booking, screenshot.as_ref())
            .await?;
        tracing::info!(booking_id = %booking.id, "Booking stored");
        Ok(self.notify(Submission::Booking(booking)).await)
    }

    /// Never fails: the record is already committed.
    async fn notify(&self, submission: Submission) -> SubmissionReceipt {
        let notifications = match self.preferences.notification_preferences().await {
            Ok(preferences) => {
                match tokio::time::timeout(
                    self.dispatch_timeout,
                    self.notifier.dispatch(&submission, &preferences),
                )
                .await
                {
                    Ok(report) => report,
                    Err(_) => {
                        tracing::warn!(
                            timeout_ms = self.dispatch_timeout.as_millis() as u64,
                            "Notification dispatch timed out"
                        );
                        DispatchReport::failed("Notification dispatch timed out.")
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Failed to read notification preferences");
                DispatchReport::failed("Notification preferences are unavailable.")
            }
        };
        SubmissionReceipt {
            id: submission.id(),
            kind: submission.kind(),
            status: submission.status(),
            notifications,
        }
    }
}
