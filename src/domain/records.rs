use crate::domain::Status;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted miles-purchase inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_country: Option<String>,
    pub airline: String,
    pub miles_amount: i64,
    pub message: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted reward-flight booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_country: Option<String>,
    pub from_airport_code: String,
    pub to_airport_code: String,
    pub departure_date: NaiveDate,
    pub airline: String,
    pub points_required: i64,
    pub flight_details: String,
    pub screenshot_url: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Lead,
    Booking,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Lead => "lead",
            SubmissionKind::Booking => "booking",
        }
    }
}

/// A freshly stored record, as handed to notification dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Lead(Lead),
    Booking(Booking),
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Lead(_) => SubmissionKind::Lead,
            Submission::Booking(_) => SubmissionKind::Booking,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Submission::Lead(lead) => lead.id,
            Submission::Booking(booking) => booking.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Submission::Lead(lead) => &lead.email,
            Submission::Booking(booking) => &booking.email,
        }
    }

    pub fn first_name(&self) -> &str {
        match self {
            Submission::Lead(lead) => &lead.first_name,
            Submission::Booking(booking) => &booking.first_name,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Submission::Lead(lead) => lead.status,
            Submission::Booking(booking) => booking.status,
        }
    }
}
