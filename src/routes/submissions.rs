use crate::domain::{AttachmentUpload, BookingPayload, LeadPayload};
use crate::intake::{IntakePipeline, SubmissionError, SubmissionReceipt};
use anyhow::Context;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::{json, Json};
use rocket::{Request, State};
use tokio::io::AsyncReadExt;
use uuid::Uuid;

/// Fields are optional here so that a missing field is reported by the
/// validator alongside every other problem, instead of as a bare 422.
#[derive(FromForm)]
pub struct LeadForm {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    phone_country: Option<String>,
    airline: Option<String>,
    miles_amount: Option<String>,
    message: Option<String>,
}

impl From<LeadForm> for LeadPayload {
    fn from(form: LeadForm) -> Self {
        LeadPayload {
            first_name: form.first_name.unwrap_or_default(),
            last_name: form.last_name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            phone_country: form.phone_country,
            airline: form.airline.unwrap_or_default(),
            miles_amount: form.miles_amount.unwrap_or_default(),
            message: form.message,
        }
    }
}

#[derive(FromForm)]
pub struct BookingForm<'r> {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    phone_country: Option<String>,
    from_airport_code: Option<String>,
    to_airport_code: Option<String>,
    departure_date: Option<String>,
    airline: Option<String>,
    points_required: Option<String>,
    flight_details: Option<String>,
    screenshot: Option<TempFile<'r>>,
}

impl BookingForm<'_> {
    async fn into_payload(self) -> Result<BookingPayload, anyhow::Error> {
        let screenshot = match self.screenshot {
            Some(file) if file.len() > 0 => Some(read_upload(&file).await?),
            _ => None,
        };
        Ok(BookingPayload {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            phone_country: self.phone_country,
            from_airport_code: self.from_airport_code.unwrap_or_default(),
            to_airport_code: self.to_airport_code.unwrap_or_default(),
            departure_date: self.departure_date.unwrap_or_default(),
            airline: self.airline.unwrap_or_default(),
            points_required: self.points_required.unwrap_or_default(),
            flight_details: self.flight_details.unwrap_or_default(),
            screenshot,
        })
    }
}

async fn read_upload(file: &TempFile<'_>) -> Result<AttachmentUpload, anyhow::Error> {
    let mut bytes = Vec::with_capacity(file.len() as usize);
    file.open()
        .await
        .context("Failed to open the uploaded file.")?
        .read_to_end(&mut bytes)
        .await
        .context("Failed to read the uploaded file.")?;
    Ok(AttachmentUpload {
        file_name: file
            .raw_name()
            .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string()),
        content_type: file.content_type().map(|ct| ct.to_string()),
        bytes,
    })
}

#[tracing::instrument(
    name = "Receiving a miles lead",
    skip(form, pipeline),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/leads", data = "<form>")]
pub async fn submit_lead(
    form: Form<LeadForm>,
    pipeline: &State<IntakePipeline>,
) -> Result<Json<SubmissionReceipt>, SubmissionError> {
    pipeline
        .submit_lead(form.into_inner().into())
        .await
        .map(Json)
}

#[tracing::instrument(
    name = "Receiving a reward flight booking",
    skip(form, pipeline),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/bookings", data = "<form>")]
pub async fn submit_booking(
    form: Form<BookingForm<'_>>,
    pipeline: &State<IntakePipeline>,
) -> Result<Json<SubmissionReceipt>, SubmissionError> {
    let payload = form.into_inner().into_payload().await?;
    pipeline.submit_booking(payload).await.map(Json)
}

impl<'r> Responder<'r, 'static> for SubmissionError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let (status, body) = match &self {
            SubmissionError::Validation(errors) => {
                tracing::info!("Rejected submission: {}", errors);
                (Status::BadRequest, json!({ "errors": errors }))
            }
            SubmissionError::Attachment(_) => {
                tracing::warn!("SubmissionError: {:?}", self);
                (
                    Status::BadGateway,
                    json!({ "error": "The attachment could not be stored. Please try again." }),
                )
            }
            SubmissionError::Persistence(_) | SubmissionError::Unexpected(_) => {
                tracing::error!("SubmissionError: {:?}", self);
                (
                    Status::InternalServerError,
                    json!({ "error": "Your request could not be saved. Please try again." }),
                )
            }
        };
        (status, Json(body)).respond_to(request)
    }
}
