//! Staff tooling: list, inspect, move through the status lifecycle, delete.

use crate::domain::{Booking, Lead, Status, StatusParseError, SubmissionKind, SubmitterEmail};
use crate::notifications::NotificationPreferences;
use crate::repository::{PersistenceError, PreferencesStore, SubmissionStore};
use crate::routes::error_chain_fmt;
use rocket::http::Status as HttpStatus;
use rocket::response::status::NoContent;
use rocket::response::Responder;
use rocket::serde::json::{json, Json};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

type Submissions = State<Arc<dyn SubmissionStore>>;
type Preferences = State<Arc<dyn PreferencesStore>>;

#[derive(thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    InvalidStatus(#[from] StatusParseError),
    #[error("'{0}' is not a valid email address.")]
    InvalidRecipient(String),
    #[error("No {} with id {id} exists.", kind.as_str())]
    NotFound { kind: SubmissionKind, id: Uuid },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<PersistenceError> for AdminError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::NotFound { kind, id } => AdminError::NotFound { kind, id },
            PersistenceError::Unexpected(e) => AdminError::Unexpected(e),
        }
    }
}

impl std::fmt::Debug for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for AdminError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = match self {
            AdminError::InvalidStatus(_) | AdminError::InvalidRecipient(_) => {
                HttpStatus::BadRequest
            }
            AdminError::NotFound { .. } => HttpStatus::NotFound,
            AdminError::Unexpected(_) => {
                tracing::error!("AdminError: {:?}", self);
                return (
                    HttpStatus::InternalServerError,
                    Json(json!({ "error": "Something went wrong." })),
                )
                    .respond_to(request);
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).respond_to(request)
    }
}

/// A record plus what the UI should offer next.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView<T> {
    #[serde(flatten)]
    record: T,
    status_label: &'static str,
    next_statuses: Vec<Status>,
}

impl RecordView<Lead> {
    fn lead(lead: Lead) -> Self {
        let status = lead.status;
        Self::with_status(lead, status)
    }
}

impl RecordView<Booking> {
    fn booking(booking: Booking) -> Self {
        let status = booking.status;
        Self::with_status(booking, status)
    }
}

impl<T> RecordView<T> {
    fn with_status(record: T, status: Status) -> Self {
        Self {
            record,
            status_label: status.label(),
            next_statuses: status.next_suggested(),
        }
    }
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    id: Uuid,
    status: Status,
    status_label: &'static str,
    terminal: bool,
    next_statuses: Vec<Status>,
}

impl StatusChanged {
    fn new(id: Uuid, status: Status) -> Self {
        Self {
            id,
            status,
            status_label: status.label(),
            terminal: status.is_terminal(),
            next_statuses: status.next_suggested(),
        }
    }
}

fn status_filter(raw: Option<&str>) -> Result<Option<Status>, AdminError> {
    Ok(raw.map(Status::parse).transpose()?)
}

#[tracing::instrument(name = "List leads", skip(store))]
#[get("/admin/leads?<status>")]
pub async fn list_leads(
    status: Option<&str>,
    store: &Submissions,
) -> Result<Json<Vec<Lead>>, AdminError> {
    Ok(Json(store.list_leads(status_filter(status)?).await?))
}

#[tracing::instrument(name = "List bookings", skip(store))]
#[get("/admin/bookings?<status>")]
pub async fn list_bookings(
    status: Option<&str>,
    store: &Submissions,
) -> Result<Json<Vec<Booking>>, AdminError> {
    Ok(Json(store.list_bookings(status_filter(status)?).await?))
}

#[get("/admin/leads/<id>")]
pub async fn get_lead(
    id: Uuid,
    store: &Submissions,
) -> Result<Json<RecordView<Lead>>, AdminError> {
    Ok(Json(RecordView::lead(store.find_lead(id).await?)))
}

#[get("/admin/bookings/<id>")]
pub async fn get_booking(
    id: Uuid,
    store: &Submissions,
) -> Result<Json<RecordView<Booking>>, AdminError> {
    Ok(Json(RecordView::booking(store.find_booking(id).await?)))
}

async fn change_status(
    store: &Submissions,
    kind: SubmissionKind,
    id: Uuid,
    raw: &str,
) -> Result<Json<StatusChanged>, AdminError> {
    let status = Status::parse(raw)?;
    store.update_status(kind, id, status).await?;
    tracing::info!(%id, kind = kind.as_str(), status = status.as_str(), "Status updated");
    Ok(Json(StatusChanged::new(id, status)))
}

#[tracing::instrument(name = "Update lead status", skip(store, body))]
#[put("/admin/leads/<id>/status", data = "<body>")]
pub async fn update_lead_status(
    id: Uuid,
    body: Json<StatusUpdate>,
    store: &Submissions,
) -> Result<Json<StatusChanged>, AdminError> {
    change_status(store, SubmissionKind::Lead, id, &body.status).await
}

#[tracing::instrument(name = "Update booking status", skip(store, body))]
#[put("/admin/bookings/<id>/status", data = "<body>")]
pub async fn update_booking_status(
    id: Uuid,
    body: Json<StatusUpdate>,
    store: &Submissions,
) -> Result<Json<StatusChanged>, AdminError> {
    change_status(store, SubmissionKind::Booking, id, &body.status).await
}

#[tracing::instrument(name = "Delete lead", skip(store))]
#[delete("/admin/leads/<id>")]
pub async fn delete_lead(id: Uuid, store: &Submissions) -> Result<NoContent, AdminError> {
    store.delete(SubmissionKind::Lead, id).await?;
    Ok(NoContent)
}

#[tracing::instrument(name = "Delete booking", skip(store))]
#[delete("/admin/bookings/<id>")]
pub async fn delete_booking(id: Uuid, store: &Submissions) -> Result<NoContent, AdminError> {
    store.delete(SubmissionKind::Booking, id).await?;
    Ok(NoContent)
}

#[get("/admin/notification-settings")]
pub async fn get_notification_settings(
    store: &Preferences,
) -> Result<Json<NotificationPreferences>, AdminError> {
    Ok(Json(store.notification_preferences().await?))
}

#[tracing::instrument(name = "Update notification settings", skip(store, body))]
#[put("/admin/notification-settings", data = "<body>")]
pub async fn update_notification_settings(
    body: Json<NotificationPreferences>,
    store: &Preferences,
) -> Result<Json<NotificationPreferences>, AdminError> {
    let body = body.into_inner();
    let admin_emails = body
        .admin_emails
        .into_iter()
        .filter(|email| !email.trim().is_empty())
        .map(|email| {
            SubmitterEmail::parse(email.clone())
                .map(|parsed| parsed.as_ref().to_string())
                .map_err(|_| AdminError::InvalidRecipient(email))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let preferences = NotificationPreferences {
        enabled: body.enabled,
        admin_emails,
    };
    store.save_notification_preferences(&preferences).await?;
    Ok(Json(preferences))
}
