use crate::attachments::StorageRef;
use crate::domain::{Booking, Lead, NewBooking, NewLead, Status, SubmissionKind};
use crate::notifications::NotificationPreferences;
use crate::repository::{PersistenceError, PreferencesStore, SubmissionStore, INITIAL_STATUS};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Process-local storage for development and tests. Nothing survives a
/// restart.
#[derive(Default)]
pub struct InMemoryStore {
    leads: Mutex<Vec<Lead>>,
    bookings: Mutex<Vec<Booking>>,
    preferences: Mutex<NotificationPreferences>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: NotificationPreferences) -> Self {
        Self {
            preferences: Mutex::new(preferences),
            ..Self::default()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, anyhow::Error> {
    mutex
        .lock()
        .map_err(|_| anyhow!("In-memory store lock is poisoned."))
}

fn newest_first<T, F>(records: &[T], status: Option<Status>, status_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Status,
{
    records
        .iter()
        .rev()
        .filter(|record| status.map_or(true, |s| status_of(record) == s))
        .cloned()
        .collect()
}

#[async_trait]
impl SubmissionStore for InMemoryStore {
    async fn create_lead(&self, lead: &NewLead) -> Result<Lead, PersistenceError> {
        let now = Utc::now();
        let lead = Lead {
            id: Uuid::new_v4(),
            first_name: lead.first_name.as_ref().to_string(),
            last_name: lead.last_name.as_ref().to_string(),
            email: lead.email.as_ref().to_string(),
            phone: lead.phone.formatted().to_string(),
            phone_country: lead.phone.country().map(String::from),
            airline: lead.airline.clone(),
            miles_amount: lead.miles_amount.value(),
            message: lead.message.clone(),
            status: INITIAL_STATUS,
            created_at: now,
            updated_at: now,
        };
        lock(&self.leads)?.push(lead.clone());
        Ok(lead)
    }

    async fn create_booking(
        &self,
        booking: &NewBooking,
        screenshot: Option<&StorageRef>,
    ) -> Result<Booking, PersistenceError> {
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            first_name: booking.first_name.as_ref().to_string(),
            last_name: booking.last_name.as_ref().to_string(),
            email: booking.email.as_ref().to_string(),
            phone: booking.phone.formatted().to_string(),
            phone_country: booking.phone.country().map(String::from),
            from_airport_code: booking.route.from().to_string(),
            to_airport_code: booking.route.to().to_string(),
            departure_date: booking.route.departure(),
            airline: booking.airline.clone(),
            points_required: booking.points_required.value(),
            flight_details: booking.flight_details.clone(),
            screenshot_url: screenshot.map(|s| s.url().to_string()),
            status: INITIAL_STATUS,
            created_at: now,
            updated_at: now,
        };
        lock(&self.bookings)?.push(booking.clone());
        Ok(booking)
    }

    async fn list_leads(&self, status: Option<Status>) -> Result<Vec<Lead>, PersistenceError> {
        Ok(newest_first(&lock(&self.leads)?, status, |l| l.status))
    }

    async fn list_bookings(
        &self,
        status: Option<Status>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        Ok(newest_first(&lock(&self.bookings)?, status, |b| b.status))
    }

    async fn find_lead(&self, id: Uuid) -> Result<Lead, PersistenceError> {
        lock(&self.leads)?
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(PersistenceError::NotFound {
                kind: SubmissionKind::Lead,
                id,
            })
    }

    async fn find_booking(&self, id: Uuid) -> Result<Booking, PersistenceError> {
        lock(&self.bookings)?
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(PersistenceError::NotFound {
                kind: SubmissionKind::Booking,
                id,
            })
    }

    async fn update_status(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        status: Status,
    ) -> Result<(), PersistenceError> {
        let not_found = PersistenceError::NotFound { kind, id };
        let now = Utc::now();
        match kind {
            SubmissionKind::Lead => {
                let mut leads = lock(&self.leads)?;
                let lead = leads.iter_mut().find(|l| l.id == id).ok_or(not_found)?;
                lead.status = status;
                lead.updated_at = now;
            }
            SubmissionKind::Booking => {
                let mut bookings = lock(&self.bookings)?;
                let booking = bookings.iter_mut().find(|b| b.id == id).ok_or(not_found)?;
                booking.status = status;
                booking.updated_at = now;
            }
        }
        Ok(())
    }

    async fn delete(&self, kind: SubmissionKind, id: Uuid) -> Result<(), PersistenceError> {
        let removed = match kind {
            SubmissionKind::Lead => {
                let mut leads = lock(&self.leads)?;
                let before = leads.len();
                leads.retain(|l| l.id != id);
                before != leads.len()
            }
            SubmissionKind::Booking => {
                let mut bookings = lock(&self.bookings)?;
                let before = bookings.len();
                bookings.retain(|b| b.id != id);
                before != bookings.len()
            }
        };
        if removed {
            Ok(())
        } else {
            Err(PersistenceError::NotFound { kind, id })
        }
    }
}

#[async_trait]
impl PreferencesStore for InMemoryStore {
    async fn notification_preferences(&self) -> Result<NotificationPreferences, anyhow::Error> {
        Ok(lock(&self.preferences)?.clone())
    }

    async fn save_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), anyhow::Error> {
        *lock(&self.preferences)? = preferences.clone();
        Ok(())
    }
}
