use crate::domain::{Booking, Lead, Submission};
use crate::notifications::{DispatchReport, NotificationDispatcher, NotificationRequest, Notifier};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

type ReportResponse = (Status, Json<DispatchReport>);

fn respond(report: DispatchReport) -> ReportResponse {
    let status = if report.success {
        Status::Ok
    } else {
        Status::BadGateway
    };
    (status, Json(report))
}

#[tracing::instrument(
    name = "Lead notification endpoint",
    skip(body, dispatcher),
    fields(lead_id = %body.record.id)
)]
#[post("/notifications/lead", data = "<body>")]
pub async fn notify_lead(
    body: Json<NotificationRequest<Lead>>,
    dispatcher: &State<NotificationDispatcher>,
) -> ReportResponse {
    let body = body.into_inner();
    let preferences = body.preferences();
    respond(
        dispatcher
            .dispatch(&Submission::Lead(body.record), &preferences)
            .await,
    )
}

#[tracing::instrument(
    name = "Booking notification endpoint",
    skip(body, dispatcher),
    fields(booking_id = %body.record.id)
)]
#[post("/notifications/booking", data = "<body>")]
pub async fn notify_booking(
    body: Json<NotificationRequest<Booking>>,
    dispatcher: &State<NotificationDispatcher>,
) -> ReportResponse {
    let body = body.into_inner();
    let preferences = body.preferences();
    respond(
        dispatcher
            .dispatch(&Submission::Booking(body.record), &preferences)
            .await,
    )
}
