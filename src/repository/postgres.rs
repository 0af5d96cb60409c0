use crate::attachments::StorageRef;
use crate::configuration::DatabaseSettings;
use crate::domain::{Booking, Lead, NewBooking, NewLead, Status, SubmissionKind};
use crate::models::{
    BookingRow, LeadRow, NewBookingRow, NewLeadRow, NotificationSettingsRow,
    NOTIFICATION_SETTINGS_ROW,
};
use crate::notifications::NotificationPreferences;
use crate::repository::{PersistenceError, PreferencesStore, SubmissionStore, INITIAL_STATUS};
use crate::schema::{bookings, leads, notification_settings};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use uuid::Uuid;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and bring the schema up to date.
    #[tracing::instrument(name = "Connect to Postgres", skip(settings), fields(host = %settings.host))]
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, anyhow::Error> {
        let manager = ConnectionManager::<PgConnection>::new(settings.connection_string());
        let max_connections = settings.max_connections;
        let pool = tokio::task::spawn_blocking(move || -> Result<PgPool, anyhow::Error> {
            let pool = Pool::builder()
                .max_size(max_connections)
                .build(manager)
                .context("Failed to build the Postgres connection pool.")?;
            let mut conn = pool.get().context("Failed to check out a connection.")?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;
            Ok(pool)
        })
        .await
        .context("Database setup task panicked.")??;
        Ok(Self { pool })
    }

    async fn run<F, T>(&self, query: F) -> Result<T, anyhow::Error>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, anyhow::Error> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .context("Failed to check out a database connection.")?;
            query(&mut conn)
        })
        .await
        .context("Database task panicked.")?
    }
}

fn found<T>(row: Option<T>, kind: SubmissionKind, id: Uuid) -> Result<T, PersistenceError> {
    row.ok_or(PersistenceError::NotFound { kind, id })
}

fn affected(rows: usize, kind: SubmissionKind, id: Uuid) -> Result<(), PersistenceError> {
    match rows {
        0 => Err(PersistenceError::NotFound { kind, id }),
        _ => Ok(()),
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    #[tracing::instrument(name = "Saving new lead in the database", skip(self, lead))]
    async fn create_lead(&self, lead: &NewLead) -> Result<Lead, PersistenceError> {
        let first_name = lead.first_name.as_ref().to_string();
        let last_name = lead.last_name.as_ref().to_string();
        let email = lead.email.as_ref().to_string();
        let phone = lead.phone.formatted().to_string();
        let phone_country = lead.phone.country().map(String::from);
        let airline = lead.airline.clone();
        let miles_amount = lead.miles_amount.value();
        let message = lead.message.clone();
        let row = self
            .run(move |conn| {
                let now = Utc::now();
                diesel::insert_into(leads::table)
                    .values(NewLeadRow {
                        id: &Uuid::new_v4(),
                        first_name: &first_name,
                        last_name: &last_name,
                        email: &email,
                        phone: &phone,
                        phone_country: phone_country.as_deref(),
                        airline: &airline,
                        miles_amount,
                        message: message.as_deref(),
                        status: INITIAL_STATUS.as_str(),
                        created_at: &now,
                        updated_at: &now,
                    })
                    .returning(LeadRow::as_returning())
                    .get_result(conn)
                    .context("Failed to insert lead.")
            })
            .await?;
        Ok(row.try_into()?)
    }

    #[tracing::instrument(name = "Saving new booking in the database", skip(self, booking, screenshot))]
    async fn create_booking(
        &self,
        booking: &NewBooking,
        screenshot: Option<&StorageRef>,
    ) -> Result<Booking, PersistenceError> {
        let first_name = booking.first_name.as_ref().to_string();
        let last_name = booking.last_name.as_ref().to_string();
        let email = booking.email.as_ref().to_string();
        let phone = booking.phone.formatted().to_string();
        let phone_country = booking.phone.country().map(String::from);
        let from = booking.route.from().to_string();
        let to = booking.route.to().to_string();
        let departure_date = booking.route.departure();
        let airline = booking.airline.clone();
        let points_required = booking.points_required.value();
        let flight_details = booking.flight_details.clone();
        let screenshot_url = screenshot.map(|s| s.url().to_string());
        let row = self
            .run(move |conn| {
                let now = Utc::now();
                diesel::insert_into(bookings::table)
                    .values(NewBookingRow {
                        id: &Uuid::new_v4(),
                        first_name: &first_name,
                        last_name: &last_name,
                        email: &email,
                        phone: &phone,
                        phone_country: phone_country.as_deref(),
                        from_airport_code: &from,
                        to_airport_code: &to,
                        departure_date: &departure_date,
                        airline: &airline,
                        points_required,
                        flight_details: &flight_details,
                        screenshot_url: screenshot_url.as_deref(),
                        status: INITIAL_STATUS.as_str(),
                        created_at: &now,
                        updated_at: &now,
                    })
                    .returning(BookingRow::as_returning())
                    .get_result(conn)
                    .context("Failed to insert booking.")
            })
            .await?;
        Ok(row.try_into()?)
    }

    #[tracing::instrument(name = "Listing leads", skip(self))]
    async fn list_leads(&self, status: Option<Status>) -> Result<Vec<Lead>, PersistenceError> {
        let rows = self
            .run(move |conn| {
                let mut query = leads::table
                    .select(LeadRow::as_select())
                    .order(leads::created_at.desc())
                    .into_boxed();
                if let Some(status) = status {
                    query = query.filter(leads::status.eq(status.as_str()));
                }
                query.load(conn).context("Failed to load leads.")
            })
            .await?;
        Ok(rows
            .into_iter()
            .map(Lead::try_from)
            .collect::<Result<_, _>>()?)
    }

    #[tracing::instrument(name = "Listing bookings", skip(self))]
    async fn list_bookings(
        &self,
        status: Option<Status>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let rows = self
            .run(move |conn| {
                let mut query = bookings::table
                    .select(BookingRow::as_select())
                    .order(bookings::created_at.desc())
                    .into_boxed();
                if let Some(status) = status {
                    query = query.filter(bookings::status.eq(status.as_str()));
                }
                query.load(conn).context("Failed to load bookings.")
            })
            .await?;
        Ok(rows
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn find_lead(&self, id: Uuid) -> Result<Lead, PersistenceError> {
        let row = self
            .run(move |conn| {
                leads::table
                    .find(id)
                    .select(LeadRow::as_select())
                    .first(conn)
                    .optional()
                    .context("Failed to load lead.")
            })
            .await?;
        Ok(found(row, SubmissionKind::Lead, id)?.try_into()?)
    }

    async fn find_booking(&self, id: Uuid) -> Result<Booking, PersistenceError> {
        let row = self
            .run(move |conn| {
                bookings::table
                    .find(id)
                    .select(BookingRow::as_select())
                    .first(conn)
                    .optional()
                    .context("Failed to load booking.")
            })
            .await?;
        Ok(found(row, SubmissionKind::Booking, id)?.try_into()?)
    }

    #[tracing::instrument(name = "Updating submission status", skip(self))]
    async fn update_status(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        status: Status,
    ) -> Result<(), PersistenceError> {
        let rows = self
            .run(move |conn| {
                let now = Utc::now();
                let updated = match kind {
                    SubmissionKind::Lead => diesel::update(leads::table.find(id))
                        .set((leads::status.eq(status.as_str()), leads::updated_at.eq(now)))
                        .execute(conn),
                    SubmissionKind::Booking => diesel::update(bookings::table.find(id))
                        .set((
                            bookings::status.eq(status.as_str()),
                            bookings::updated_at.eq(now),
                        ))
                        .execute(conn),
                };
                updated.context("Failed to update status.")
            })
            .await?;
        affected(rows, kind, id)
    }

    #[tracing::instrument(name = "Deleting submission", skip(self))]
    async fn delete(&self, kind: SubmissionKind, id: Uuid) -> Result<(), PersistenceError> {
        let rows = self
            .run(move |conn| {
                let deleted = match kind {
                    SubmissionKind::Lead => diesel::delete(leads::table.find(id)).execute(conn),
                    SubmissionKind::Booking => {
                        diesel::delete(bookings::table.find(id)).execute(conn)
                    }
                };
                deleted.context("Failed to delete submission.")
            })
            .await?;
        affected(rows, kind, id)
    }
}

#[async_trait]
impl PreferencesStore for PgStore {
    #[tracing::instrument(name = "Reading notification preferences", skip(self))]
    async fn notification_preferences(&self) -> Result<NotificationPreferences, anyhow::Error> {
        let row = self
            .run(|conn| {
                notification_settings::table
                    .find(NOTIFICATION_SETTINGS_ROW)
                    .select(NotificationSettingsRow::as_select())
                    .first(conn)
                    .optional()
                    .context("Failed to load notification settings.")
            })
            .await?;
        Ok(row
            .map(|row| NotificationPreferences {
                enabled: row.enabled,
                admin_emails: row.admin_emails,
            })
            .unwrap_or_default())
    }

    #[tracing::instrument(name = "Saving notification preferences", skip(self, preferences))]
    async fn save_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), anyhow::Error> {
        let row = NotificationSettingsRow {
            id: NOTIFICATION_SETTINGS_ROW,
            enabled: preferences.enabled,
            admin_emails: preferences.admin_emails.clone(),
            updated_at: Utc::now(),
        };
        self.run(move |conn| {
            diesel::insert_into(notification_settings::table)
                .values(&row)
                .on_conflict(notification_settings::id)
                .do_update()
                .set(&row)
                .execute(conn)
                .context("Failed to save notification settings.")
        })
        .await?;
        Ok(())
    }
}
