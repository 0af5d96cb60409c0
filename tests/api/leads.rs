use crate::helpers::{
    spawn_app, spawn_app_with, valid_lead_body, MockEmailClient, ADMIN_EMAIL, SANDBOX_EMAIL,
};
use miles_intake::domain::Status;
use miles_intake::repository::SubmissionStore;
use serde_json::Value;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn a_valid_lead_is_stored_and_both_parties_are_notified() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_lead(valid_lead_body()).await;

    // assert
    assert_eq!(200, response.status().code);
    let receipt: Value = response.into_json().await.unwrap();
    assert_eq!(receipt["status"], "new");
    assert_eq!(receipt["kind"], "lead");
    assert_eq!(receipt["notifications"]["success"], true);
    assert_eq!(receipt["notifications"]["sent"], 2);

    let saved = app.store.list_leads(None).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id.to_string(), receipt["id"].as_str().unwrap());
    assert_eq!(saved[0].miles_amount, 75_000);
    assert_eq!(saved[0].phone, "+971 52 958 1786");
    assert_eq!(saved[0].phone_country.as_deref(), Some("AE"));
    assert_eq!(saved[0].status, Status::New);

    let emails = app.sent_emails();
    assert_eq!(emails.len(), 2);
    assert!(emails
        .iter()
        .any(|e| e.recipients == vec!["ursula_le_guin@gmail.com".to_string()]));
    let alert = emails
        .iter()
        .find(|e| e.recipients == vec![ADMIN_EMAIL.to_string()])
        .expect("No admin alert was sent.");
    assert!(alert.subject.contains("75,000 miles"));
}

#[tokio::test]
async fn a_lead_below_the_minimum_is_rejected_without_side_effects() {
    // arrange
    let app = spawn_app().await;
    let body = valid_lead_body().replace("miles_amount=75000", "miles_amount=49999");

    // act
    let response = app.post_lead(body).await;

    // assert
    assert_eq!(400, response.status().code);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["errors"][0]["code"], "InvalidQuantity");
    assert_eq!(body["errors"][0]["field"], "miles_amount");
    assert!(app.store.list_leads(None).await.unwrap().is_empty());
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_lead("".into()).await;

    // assert
    assert_eq!(400, response.status().code);
    let body: Value = response.into_json().await.unwrap();
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    for field in ["first_name", "last_name", "email", "phone", "airline", "miles_amount"] {
        assert!(fields.iter().any(|f| f == field), "{} was not reported", field);
    }
}

#[tokio::test]
async fn a_lead_returns_400_when_fields_are_present_but_invalid() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            valid_lead_body().replace("email=ursula_le_guin%40gmail.com", "email=not-an-email"),
            "InvalidEmail",
        ),
        (
            valid_lead_body().replace("phone=%2B971%2052%20958%201786", "phone=123"),
            "InvalidPhone",
        ),
        (
            valid_lead_body().replace("miles_amount=75000", "miles_amount=lots"),
            "InvalidQuantity",
        ),
        (
            valid_lead_body().replace("first_name=Ursula", "first_name=%3Cscript%3E"),
            "InvalidName",
        ),
    ];

    for (body, expected_code) in test_cases {
        // act
        let response = app.post_lead(body).await;

        // assert
        assert_eq!(
            400,
            response.status().code,
            "The API did not reject a payload with {}.",
            expected_code
        );
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], expected_code);
    }
}

#[tokio::test]
async fn unverified_sender_domains_deliver_to_the_sandbox_in_test_mode() {
    // arrange
    let app = spawn_app_with(MockEmailClient::new(false)).await;

    // act
    let response = app.post_lead(valid_lead_body()).await;

    // assert
    assert_eq!(200, response.status().code);
    let receipt: Value = response.into_json().await.unwrap();
    assert_eq!(receipt["notifications"]["testMode"], true);
    let emails = app.sent_emails();
    assert_eq!(emails.len(), 2);
    assert!(emails
        .iter()
        .all(|e| e.recipients == vec![SANDBOX_EMAIL.to_string()]));
}

#[tokio::test]
async fn a_failing_email_provider_does_not_lose_the_lead() {
    // arrange
    let app = spawn_app().await;
    app.email_client.failing.store(true, Ordering::SeqCst);

    // act
    let response = app.post_lead(valid_lead_body()).await;

    // assert
    assert_eq!(200, response.status().code);
    let receipt: Value = response.into_json().await.unwrap();
    assert_eq!(receipt["notifications"]["success"], false);
    assert_eq!(receipt["notifications"]["sent"], 0);
    assert_eq!(
        receipt["notifications"]["errors"].as_array().unwrap().len(),
        2
    );
    assert_eq!(app.store.list_leads(None).await.unwrap().len(), 1);
}
