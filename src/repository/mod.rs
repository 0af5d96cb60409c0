//! Durable storage of leads and bookings, plus the staff-editable
//! notification preferences.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::{PgStore, MIGRATIONS};

use crate::attachments::StorageRef;
use crate::domain::{Booking, Lead, NewBooking, NewLead, Status, SubmissionKind};
use crate::notifications::NotificationPreferences;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum PersistenceError {
    #[error("No {} with id {id} exists.", kind.as_str())]
    NotFound { kind: SubmissionKind, id: Uuid },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::routes::error_chain_fmt(self, f)
    }
}

/// Every new record starts here.
pub const INITIAL_STATUS: Status = Status::New;

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert a validated lead with status `new` and return the stored row.
    async fn create_lead(&self, lead: &NewLead) -> Result<Lead, PersistenceError>;

    /// Insert a validated booking. `screenshot` must come from a completed
    /// upload; the attachment bytes inside `booking` are ignored.
    async fn create_booking(
        &self,
        booking: &NewBooking,
        screenshot: Option<&StorageRef>,
    ) -> Result<Booking, PersistenceError>;

    /// Newest first, optionally restricted to one status.
    async fn list_leads(&self, status: Option<Status>) -> Result<Vec<Lead>, PersistenceError>;

    async fn list_bookings(&self, status: Option<Status>)
        -> Result<Vec<Booking>, PersistenceError>;

    async fn find_lead(&self, id: Uuid) -> Result<Lead, PersistenceError>;

    async fn find_booking(&self, id: Uuid) -> Result<Booking, PersistenceError>;

    /// The only mutation after creation. Fails with `NotFound` rather than
    /// doing nothing when `id` is unknown.
    async fn update_status(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        status: Status,
    ) -> Result<(), PersistenceError>;

    async fn delete(&self, kind: SubmissionKind, id: Uuid) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn notification_preferences(&self) -> Result<NotificationPreferences, anyhow::Error>;

    async fn save_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), anyhow::Error>;
}
