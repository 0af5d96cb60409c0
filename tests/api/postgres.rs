use crate::helpers::{
    configure_database, spawn_app_on_postgres, test_configuration, valid_booking,
    valid_lead_body, ADMIN_EMAIL,
};
use chrono::Utc;
use diesel::{Connection, PgConnection, RunQueryDsl};
use miles_intake::airports::AirportDirectory;
use miles_intake::configuration::DatabaseSettings;
use miles_intake::domain::{
    BookingPayload, Lead, LeadPayload, NewBooking, NewLead, Status, SubmissionKind,
};
use miles_intake::notifications::NotificationPreferences;
use miles_intake::repository::{PersistenceError, PgStore, PreferencesStore, SubmissionStore};
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

async fn fresh_store() -> (PgStore, DatabaseSettings) {
    let mut settings = test_configuration().database;
    settings.database_name = Uuid::new_v4().to_string();
    (configure_database(&settings).await, settings)
}

fn new_lead(miles: &str) -> NewLead {
    LeadPayload {
        first_name: "Ursula".into(),
        last_name: "Le Guin".into(),
        email: "ursula_le_guin@gmail.com".into(),
        phone: "+971 52 958 1786".into(),
        phone_country: Some("AE".into()),
        airline: "Emirates".into(),
        miles_amount: miles.into(),
        message: Some("Call after 6pm".into()),
    }
    .validate(50_000)
    .unwrap()
}

fn new_booking() -> NewBooking {
    let departure = Utc::now().date_naive() + chrono::Duration::days(30);
    BookingPayload {
        first_name: "Ursula".into(),
        last_name: "Le Guin".into(),
        email: "ursula_le_guin@gmail.com".into(),
        phone: "+44 20 7946 0958".into(),
        phone_country: None,
        from_airport_code: "DXB".into(),
        to_airport_code: "LHR".into(),
        departure_date: departure.format("%Y-%m-%d").to_string(),
        airline: "Emirates".into(),
        points_required: "85000".into(),
        flight_details: "EK1, business class".into(),
        screenshot: None,
    }
    .validate(
        Utc::now().date_naive(),
        &AirportDirectory::new(Duration::from_secs(3600)),
    )
    .unwrap()
}

fn ids(leads: &[Lead]) -> Vec<Uuid> {
    leads.iter().map(|lead| lead.id).collect()
}

#[tokio::test]
async fn created_leads_are_new_and_read_back_unchanged() {
    // arrange
    let (store, _) = fresh_store().await;

    // act
    let created = store.create_lead(&new_lead("75,000")).await.unwrap();
    let found = store.find_lead(created.id).await.unwrap();

    // assert
    assert_eq!(created.status, Status::New);
    assert_eq!(found.miles_amount, 75_000);
    assert_eq!(found.phone_country.as_deref(), Some("AE"));
    assert_eq!(found.message.as_deref(), Some("Call after 6pm"));
    assert_eq!(found.created_at, found.updated_at);
}

#[tokio::test]
async fn created_bookings_keep_their_route() {
    // arrange
    let (store, _) = fresh_store().await;

    // act
    let created = store.create_booking(&new_booking(), None).await.unwrap();
    let found = store.find_booking(created.id).await.unwrap();

    // assert
    assert_eq!(found.status, Status::New);
    assert_eq!(found.from_airport_code, "DXB");
    assert_eq!(found.to_airport_code, "LHR");
    assert_eq!(found.points_required, 85_000);
    assert_eq!(found.screenshot_url, None);
}

#[tokio::test]
async fn lists_are_newest_first_and_filter_by_status() {
    // arrange
    let (store, _) = fresh_store().await;
    let first = store.create_lead(&new_lead("60000")).await.unwrap();
    let second = store.create_lead(&new_lead("70000")).await.unwrap();
    let third = store.create_lead(&new_lead("80000")).await.unwrap();

    // act
    store
        .update_status(SubmissionKind::Lead, second.id, Status::InProgress)
        .await
        .unwrap();
    let all = store.list_leads(None).await.unwrap();
    let in_progress = store.list_leads(Some(Status::InProgress)).await.unwrap();
    let new = store.list_leads(Some(Status::New)).await.unwrap();

    // assert
    assert_eq!(ids(&all), vec![third.id, second.id, first.id]);
    assert_eq!(ids(&in_progress), vec![second.id]);
    assert_eq!(ids(&new), vec![third.id, first.id]);
    assert!(store.list_bookings(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn every_status_is_stored_and_read_back() {
    // arrange
    let (store, _) = fresh_store().await;
    let booking = store.create_booking(&new_booking(), None).await.unwrap();

    for status in Status::ALL {
        // act
        store
            .update_status(SubmissionKind::Booking, booking.id, status)
            .await
            .unwrap();

        // assert
        let found = store.find_booking(booking.id).await.unwrap();
        assert_eq!(found.status, status);
        assert!(found.updated_at >= found.created_at);
    }
}

#[tokio::test]
async fn missing_records_are_not_found() {
    // arrange
    let (store, _) = fresh_store().await;
    let missing = Uuid::new_v4();

    // act
    let updated = store
        .update_status(SubmissionKind::Lead, missing, Status::Contacted)
        .await;
    let found = store.find_booking(missing).await;

    // assert
    assert!(matches!(updated, Err(PersistenceError::NotFound { .. })));
    assert!(matches!(found, Err(PersistenceError::NotFound { .. })));
}

#[tokio::test]
async fn deleted_records_are_gone() {
    // arrange
    let (store, _) = fresh_store().await;
    let lead = store.create_lead(&new_lead("60000")).await.unwrap();

    // act
    store.delete(SubmissionKind::Lead, lead.id).await.unwrap();
    let again = store.delete(SubmissionKind::Lead, lead.id).await;

    // assert
    assert!(matches!(again, Err(PersistenceError::NotFound { .. })));
    assert!(store.list_leads(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn the_database_rejects_statuses_outside_the_lifecycle() {
    // arrange
    let (store, settings) = fresh_store().await;
    let lead = store.create_lead(&new_lead("60000")).await.unwrap();
    let mut connection = PgConnection::establish(&settings.connection_string())
        .expect("Failed to connect to Postgres.");

    // act
    let result = diesel::sql_query(format!(
        "UPDATE leads SET status = 'archived' WHERE id = '{}'",
        lead.id
    ))
    .execute(&mut connection);

    // assert
    assert!(result.is_err());
    let found = store.find_lead(lead.id).await.unwrap();
    assert_eq!(found.status, Status::New);
}

#[tokio::test]
async fn the_database_rejects_a_booking_to_its_own_origin() {
    // arrange
    let (store, settings) = fresh_store().await;
    let booking = store.create_booking(&new_booking(), None).await.unwrap();
    let mut connection = PgConnection::establish(&settings.connection_string())
        .expect("Failed to connect to Postgres.");

    // act
    let result = diesel::sql_query(format!(
        "UPDATE bookings SET to_airport_code = from_airport_code WHERE id = '{}'",
        booking.id
    ))
    .execute(&mut connection);

    // assert
    assert!(result.is_err());
    let found = store.find_booking(booking.id).await.unwrap();
    assert_eq!(found.to_airport_code, "LHR");
}

#[tokio::test]
async fn notification_preferences_start_enabled_and_can_be_replaced() {
    // arrange
    let (store, _) = fresh_store().await;
    let replacement = NotificationPreferences {
        enabled: false,
        admin_emails: vec![ADMIN_EMAIL.to_string(), "desk@milesdesk.example".to_string()],
    };

    // act
    let initial = store.notification_preferences().await.unwrap();
    store.save_notification_preferences(&replacement).await.unwrap();
    let saved = store.notification_preferences().await.unwrap();
    store.save_notification_preferences(&initial).await.unwrap();
    let restored = store.notification_preferences().await.unwrap();

    // assert
    assert!(initial.enabled);
    assert!(initial.admin_emails.is_empty());
    assert_eq!(saved, replacement);
    assert_eq!(restored, initial);
}

#[tokio::test]
async fn an_invalid_status_leaves_the_stored_lead_unchanged() {
    // arrange
    let app = spawn_app_on_postgres().await;
    let response = app.post_lead(valid_lead_body()).await;
    let receipt: Value = response.into_json().await.unwrap();
    let id = receipt["id"].as_str().unwrap().to_string();

    // act
    let (invalid, _) = app
        .put_json(
            &format!("/admin/leads/{}/status", id),
            json!({ "status": "archived" }),
        )
        .await;
    let (valid, body) = app
        .put_json(
            &format!("/admin/leads/{}/status", id),
            json!({ "status": "in progress" }),
        )
        .await;

    // assert
    assert_eq!(400, invalid);
    assert_eq!(200, valid);
    assert_eq!(body["status"], "in_progress");
    let lead = app.store.find_lead(id.parse().unwrap()).await.unwrap();
    assert_eq!(lead.status, Status::InProgress);
    assert_eq!(receipt["notifications"]["sent"], 2);
}

#[tokio::test]
async fn a_booking_screenshot_url_is_persisted() {
    // arrange
    let app = spawn_app_on_postgres().await;
    let form = valid_booking().file(
        "screenshot",
        "award.png",
        "image/png",
        &[0x89; 1024],
    );

    // act
    let response = app.post_booking(form).await;

    // assert
    assert_eq!(200, response.status().code);
    let saved = app.store.list_bookings(None).await.unwrap();
    let objects = app.stored_objects();
    assert_eq!(saved.len(), 1);
    assert_eq!(
        saved[0].screenshot_url.as_deref(),
        Some(
            format!(
                "https://files.milesdesk.example/{}/{}",
                objects[0].bucket, objects[0].key
            )
            .as_str()
        )
    );
}
