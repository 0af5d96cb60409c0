use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};

#[catch(413)]
pub fn payload_too_large_to_json() -> (Status, Json<Value>) {
    (
        Status::PayloadTooLarge,
        Json(json!({ "error": "The upload is larger than the server accepts." })),
    )
}
