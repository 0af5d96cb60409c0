use crate::helpers::{spawn_app, valid_booking, valid_lead_body, TestApp};
use miles_intake::domain::Status;
use miles_intake::repository::SubmissionStore;
use serde_json::{json, Value};

async fn create_lead(app: &TestApp) -> String {
    let response = app.post_lead(valid_lead_body()).await;
    let receipt: Value = response.into_json().await.unwrap();
    receipt["id"].as_str().unwrap().to_string()
}

async fn create_booking(app: &TestApp) -> String {
    let response = app.post_booking(valid_booking()).await;
    let receipt: Value = response.into_json().await.unwrap();
    receipt["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn every_lifecycle_status_can_be_set() {
    // arrange
    let app = spawn_app().await;
    let id = create_lead(&app).await;

    for status in ["contacted", "in progress", "completed", "cancelled", "new"] {
        // act
        let (code, body) = app
            .put_json(
                &format!("/admin/leads/{}/status", id),
                json!({ "status": status }),
            )
            .await;

        // assert
        assert_eq!(200, code, "Setting {} failed.", status);
        assert_eq!(body["id"], id.as_str());
    }
    let lead = app.store.find_lead(id.parse().unwrap()).await.unwrap();
    assert_eq!(lead.status, Status::New);
}

#[tokio::test]
async fn status_responses_offer_the_natural_next_steps() {
    // arrange
    let app = spawn_app().await;
    let id = create_booking(&app).await;

    // act
    let (_, contacted) = app
        .put_json(
            &format!("/admin/bookings/{}/status", id),
            json!({ "status": "contacted" }),
        )
        .await;
    let (_, completed) = app
        .put_json(
            &format!("/admin/bookings/{}/status", id),
            json!({ "status": "completed" }),
        )
        .await;

    // assert
    assert_eq!(contacted["status"], "contacted");
    assert_eq!(contacted["nextStatuses"], json!(["in_progress", "cancelled"]));
    assert_eq!(contacted["terminal"], false);
    assert_eq!(completed["nextStatuses"], json!([]));
    assert_eq!(completed["terminal"], true);
}

#[tokio::test]
async fn an_unknown_status_is_rejected_and_nothing_changes() {
    // arrange
    let app = spawn_app().await;
    let id = create_lead(&app).await;

    for invalid in ["archived", "", "in-progress"] {
        // act
        let (code, _) = app
            .put_json(
                &format!("/admin/leads/{}/status", id),
                json!({ "status": invalid }),
            )
            .await;

        // assert
        assert_eq!(400, code, "'{}' was accepted.", invalid);
    }
    let lead = app.store.find_lead(id.parse().unwrap()).await.unwrap();
    assert_eq!(lead.status, Status::New);
}

#[tokio::test]
async fn updating_a_missing_record_is_a_404() {
    // arrange
    let app = spawn_app().await;

    // act
    let (code, _) = app
        .put_json(
            &format!("/admin/bookings/{}/status", uuid::Uuid::new_v4()),
            json!({ "status": "contacted" }),
        )
        .await;

    // assert
    assert_eq!(404, code);
}

#[tokio::test]
async fn lists_can_be_filtered_by_status() {
    // arrange
    let app = spawn_app().await;
    let first = create_lead(&app).await;
    let second = create_lead(&app).await;
    app.put_json(
        &format!("/admin/leads/{}/status", first),
        json!({ "status": "contacted" }),
    )
    .await;

    // act
    let (_, all) = app.get_json("/admin/leads").await;
    let (_, contacted) = app.get_json("/admin/leads?status=contacted").await;
    let (bad_filter, _) = app.get_json("/admin/leads?status=open").await;

    // assert
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], second.as_str());
    let contacted = contacted.as_array().unwrap();
    assert_eq!(contacted.len(), 1);
    assert_eq!(contacted[0]["id"], first.as_str());
    assert_eq!(400, bad_filter);
}

#[tokio::test]
async fn records_can_be_inspected_and_deleted() {
    // arrange
    let app = spawn_app().await;
    let id = create_booking(&app).await;
    let uri = format!("/admin/bookings/{}", id);

    // act
    let (found, body) = app.get_json(&uri).await;
    let deleted = app.client.delete(uri.clone()).dispatch().await.status().code;
    let (gone, _) = app.get_json(&uri).await;
    let deleted_again = app.client.delete(uri.clone()).dispatch().await.status().code;

    // assert
    assert_eq!(200, found);
    assert_eq!(body["fromAirportCode"], "DXB");
    assert_eq!(body["statusLabel"], "New");
    assert_eq!(body["nextStatuses"], json!(["contacted", "cancelled"]));
    assert_eq!(204, deleted);
    assert_eq!(404, gone);
    assert_eq!(404, deleted_again);
}

#[tokio::test]
async fn notification_settings_are_editable_and_applied_to_the_next_submission() {
    // arrange
    let app = spawn_app().await;

    // act
    let (code, saved) = app
        .put_json(
            "/admin/notification-settings",
            json!({ "enabled": false, "adminEmails": [" sales@milesdesk.example ", ""] }),
        )
        .await;
    let (_, read_back) = app.get_json("/admin/notification-settings").await;
    let response = app.post_lead(valid_lead_body()).await;

    // assert
    assert_eq!(200, code);
    assert_eq!(saved, read_back);
    assert_eq!(read_back["adminEmails"], json!(["sales@milesdesk.example"]));
    let receipt: Value = response.into_json().await.unwrap();
    assert_eq!(receipt["notifications"]["success"], true);
    assert_eq!(receipt["notifications"]["disabled"], true);
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn invalid_admin_recipients_are_refused() {
    // arrange
    let app = spawn_app().await;

    // act
    let (code, _) = app
        .put_json(
            "/admin/notification-settings",
            json!({ "enabled": true, "adminEmails": ["not-an-email"] }),
        )
        .await;

    // assert
    assert_eq!(400, code);
    let (_, current) = app.get_json("/admin/notification-settings").await;
    assert_eq!(current["enabled"], true);
    assert_eq!(current["adminEmails"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn an_empty_admin_list_only_acknowledges_the_customer() {
    // arrange
    let app = spawn_app().await;
    app.put_json(
        "/admin/notification-settings",
        json!({ "enabled": true, "adminEmails": [] }),
    )
    .await;

    // act
    let response = app.post_lead(valid_lead_body()).await;

    // assert
    let receipt: Value = response.into_json().await.unwrap();
    assert_eq!(receipt["notifications"]["success"], true);
    assert_eq!(receipt["notifications"]["sent"], 1);
    assert_eq!(receipt["notifications"]["adminSkipped"], true);
    assert!(receipt["notifications"].get("errors").is_none());
}
