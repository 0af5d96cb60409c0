use async_trait::async_trait;
use diesel::{Connection, PgConnection, RunQueryDsl};
use miles_intake::attachments::ObjectStore;
use miles_intake::configuration::{get_configuration, DatabaseSettings, Settings, StorageBackend};
use miles_intake::email::{DeliveryReceipt, Email};
use miles_intake::notifications::NotificationPreferences;
use miles_intake::repository::{InMemoryStore, PgStore, PreferencesStore, SubmissionStore};
use miles_intake::startup::{Application, Collaborators};
use miles_intake::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use rocket::http::{ContentType, Header};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const ADMIN_EMAIL: &str = "ops@milesdesk.example";
pub const SANDBOX_EMAIL: &str = "sandbox@milesdesk.example";

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub struct MockEmailClient {
    pub sent_emails: Mutex<Vec<SentEmail>>,
    pub verified_domain: bool,
    pub failing: AtomicBool,
}

impl MockEmailClient {
    pub fn new(verified_domain: bool) -> Self {
        Self {
            sent_emails: Mutex::new(vec![]),
            verified_domain,
            failing: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Email for MockEmailClient {
    async fn send_email(
        &self,
        recipients: &[String],
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<DeliveryReceipt, anyhow::Error> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("the provider rejected the message");
        }
        self.sent_emails.lock().unwrap().push(SentEmail {
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            html: html_content.to_string(),
            text: text_content.to_string(),
        });
        Ok(DeliveryReceipt {
            message_id: Some(Uuid::new_v4().to_string()),
            sandboxed: false,
        })
    }

    fn supports_arbitrary_recipients(&self) -> bool {
        self.verified_domain
    }

    fn sandbox_recipient(&self) -> &str {
        SANDBOX_EMAIL
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
pub struct MockObjectStore {
    pub objects: Mutex<Vec<StoredObject>>,
    pub failing: AtomicBool,
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, anyhow::Error> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("storage quota exceeded");
        }
        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        Ok(format!("https://files.milesdesk.example/{}/{}", bucket, key))
    }
}

pub struct TestApp {
    pub client: Client,
    pub email_client: Arc<MockEmailClient>,
    pub object_store: Arc<MockObjectStore>,
    pub store: Arc<dyn SubmissionStore>,
}

impl TestApp {
    pub async fn post_lead(&self, body: String) -> LocalResponse<'_> {
        self.client
            .post("/leads")
            .header(ContentType::Form)
            .body(body)
            .dispatch()
            .await
    }

    pub async fn post_booking(&self, form: MultipartForm) -> LocalResponse<'_> {
        let (content_type, body) = form.finish();
        self.client
            .post("/bookings")
            .header(content_type)
            .body(body)
            .dispatch()
            .await
    }

    pub async fn get_json(&self, uri: &str) -> (u16, Value) {
        let response = self.client.get(uri.to_string()).dispatch().await;
        let status = response.status().code;
        let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .put(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        let status = response.status().code;
        let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        let status = response.status().code;
        let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.email_client.sent_emails.lock().unwrap().clone()
    }

    pub fn stored_objects(&self) -> Vec<StoredObject> {
        self.object_store.objects.lock().unwrap().clone()
    }
}

pub struct MultipartForm {
    body: Vec<u8>,
}

const BOUNDARY: &str = "X-MILES-INTAKE-BOUNDARY";

impl MultipartForm {
    pub fn new() -> Self {
        Self { body: vec![] }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                Content-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (Header<'static>, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        let content_type = Header::new(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        (content_type, self.body)
    }
}

/// A booking form that passes validation, departing a month from now.
pub fn valid_booking() -> MultipartForm {
    booking_with(&[])
}

/// [`valid_booking`] with some fields replaced.
pub fn booking_with(overrides: &[(&str, &str)]) -> MultipartForm {
    let departure = (chrono::Utc::now().date_naive() + chrono::Duration::days(30))
        .format("%Y-%m-%d")
        .to_string();
    let fields = [
        ("first_name", "Ursula"),
        ("last_name", "Le Guin"),
        ("email", "ursula_le_guin@gmail.com"),
        ("phone", "+44 20 7946 0958"),
        ("phone_country", "GB"),
        ("from_airport_code", "DXB"),
        ("to_airport_code", "LHR"),
        ("departure_date", departure.as_str()),
        ("airline", "Emirates"),
        ("points_required", "85000"),
        ("flight_details", "EK1, business class"),
    ];
    fields.iter().fold(MultipartForm::new(), |form, (name, value)| {
        let value = overrides
            .iter()
            .find(|(field, _)| field == name)
            .map_or(*value, |(_, replacement)| *replacement);
        form.text(name, value)
    })
}

pub fn valid_lead_body() -> String {
    "first_name=Ursula&last_name=Le%20Guin&email=ursula_le_guin%40gmail.com\
    &phone=%2B971%2052%20958%201786&phone_country=AE&airline=Emirates\
    &miles_amount=75000"
        .to_string()
}

pub fn test_configuration() -> Settings {
    let mut c = get_configuration().expect("Failed to read configuration.");
    c.application.port = None;
    c.database.backend = StorageBackend::Memory;
    c.notifications.endpoint_base_url = None;
    c.notifications.dispatch_timeout_milliseconds = 2_000;
    c
}

fn admin_preferences() -> NotificationPreferences {
    NotificationPreferences {
        enabled: true,
        admin_emails: vec![ADMIN_EMAIL.to_string()],
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(MockEmailClient::new(true)).await
}

pub async fn spawn_app_with(email_client: MockEmailClient) -> TestApp {
    Lazy::force(&TRACING);

    let store = Arc::new(InMemoryStore::with_preferences(admin_preferences()));
    launch(test_configuration(), email_client, store.clone(), store).await
}

/// An application backed by a freshly migrated Postgres database of its own.
pub async fn spawn_app_on_postgres() -> TestApp {
    Lazy::force(&TRACING);

    let mut configuration = test_configuration();
    configuration.database.backend = StorageBackend::Postgres;
    configuration.database.database_name = Uuid::new_v4().to_string();
    let store = Arc::new(configure_database(&configuration.database).await);
    store
        .save_notification_preferences(&admin_preferences())
        .await
        .expect("Failed to save notification preferences.");
    launch(configuration, MockEmailClient::new(true), store.clone(), store).await
}

/// Create an empty database named by `settings` and run the migrations.
pub async fn configure_database(settings: &DatabaseSettings) -> PgStore {
    let mut connection = PgConnection::establish(&settings.connection_string_without_database())
        .expect("Failed to connect to Postgres.");
    diesel::sql_query(format!(r#"CREATE DATABASE "{}";"#, settings.database_name))
        .execute(&mut connection)
        .expect("Failed to create database.");
    PgStore::connect(settings)
        .await
        .expect("Failed to migrate the database.")
}

async fn launch(
    configuration: Settings,
    email_client: MockEmailClient,
    submissions: Arc<dyn SubmissionStore>,
    preferences: Arc<dyn PreferencesStore>,
) -> TestApp {
    let email_client = Arc::new(email_client);
    let object_store = Arc::new(MockObjectStore::default());

    let app = Application::build(
        &configuration,
        Collaborators {
            email_client: email_client.clone(),
            object_store: object_store.clone(),
            submissions: submissions.clone(),
            preferences,
        },
    )
    .expect("Failed to build application.");
    let client = Client::tracked(app.server)
        .await
        .expect("Failed to start application.");
    TestApp {
        client,
        email_client,
        object_store,
        store: submissions,
    }
}
