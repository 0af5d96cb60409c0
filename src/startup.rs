use crate::airports::AirportDirectory;
use crate::attachments::{AttachmentHandler, HttpObjectStore, ObjectStore};
use crate::catchers::*;
use crate::configuration::{Settings, StorageBackend};
use crate::email::{Email, SesEmailClient};
use crate::intake::IntakePipeline;
use crate::notifications::{NotificationDispatcher, Notifier, RemoteNotifier};
use crate::repository::{InMemoryStore, PgStore, PreferencesStore, SubmissionStore};
use crate::routes::*;
use rocket::data::{Limits, ToByteUnit};
use rocket::{Build, Config, Rocket};
use std::sync::Arc;

/// The outside world the application talks to.
pub struct Collaborators {
    pub email_client: Arc<dyn Email>,
    pub object_store: Arc<dyn ObjectStore>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub preferences: Arc<dyn PreferencesStore>,
}

fn shared<S>(store: S) -> (Arc<dyn SubmissionStore>, Arc<dyn PreferencesStore>)
where
    S: SubmissionStore + PreferencesStore + 'static,
{
    let store = Arc::new(store);
    (store.clone(), store)
}

pub struct Application {
    pub server: Rocket<Build>,
}

impl Application {
    /// Connects every collaborator described by `settings`.
    pub async fn build_from_settings(settings: &Settings) -> Result<Self, anyhow::Error> {
        let (submissions, preferences) = match settings.database.backend {
            StorageBackend::Postgres => shared(PgStore::connect(&settings.database).await?),
            StorageBackend::Memory => {
                tracing::warn!("Using the in-memory store, submissions are lost on restart");
                shared(InMemoryStore::new())
            }
        };
        let collaborators = Collaborators {
            email_client: Arc::new(SesEmailClient::new(&settings.email_client).await?),
            object_store: Arc::new(HttpObjectStore::new(&settings.object_storage)?),
            submissions,
            preferences,
        };
        Self::build(settings, collaborators)
    }

    pub fn build(settings: &Settings, collaborators: Collaborators) -> Result<Self, anyhow::Error> {
        let airports = Arc::new(AirportDirectory::new(settings.airports.cache_ttl()));
        let notifier: Arc<dyn Notifier> = match &settings.notifications.endpoint_base_url {
            Some(base_url) => {
                tracing::info!(%base_url, "Delegating notifications to the HTTP endpoints");
                Arc::new(RemoteNotifier::new(
                    base_url,
                    settings.notifications.dispatch_timeout(),
                )?)
            }
            None => Arc::new(NotificationDispatcher::new(
                collaborators.email_client.clone(),
            )),
        };
        let pipeline = IntakePipeline::new(
            airports.clone(),
            AttachmentHandler::new(
                collaborators.object_store,
                settings.object_storage.bucket.clone(),
            ),
            collaborators.submissions.clone(),
            collaborators.preferences.clone(),
            notifier,
            settings.submissions.minimum_miles,
            settings.notifications.dispatch_timeout(),
        );

        let server = rocket::custom(Config {
            port: settings.application.port.unwrap_or(0),
            address: settings.application.host,
            limits: Limits::default()
                .limit("file", 10.mebibytes())
                .limit("data-form", 12.mebibytes()),
            ..Config::default()
        })
        .manage(airports)
        .manage(pipeline)
        .manage(collaborators.submissions)
        .manage(collaborators.preferences)
        .manage(NotificationDispatcher::new(collaborators.email_client))
        .mount(
            "/",
            routes![
                health_check,
                search_airports,
                get_airport,
                submit_lead,
                submit_booking,
                notify_lead,
                notify_booking,
                list_leads,
                list_bookings,
                get_lead,
                get_booking,
                update_lead_status,
                update_booking_status,
                delete_lead,
                delete_booking,
                get_notification_settings,
                update_notification_settings,
            ],
        )
        .register(
            "/",
            catchers![
                unprocessable_entity_to_bad_request,
                not_found_to_json,
                payload_too_large_to_json
            ],
        );
        Ok(Self { server })
    }
}
