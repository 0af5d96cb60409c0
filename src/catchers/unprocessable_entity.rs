use rocket::response::status::BadRequest;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

/// Malformed bodies are the client's fault, so they get a 400 like any other
/// bad input.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(req: &Request) -> BadRequest<Json<Value>> {
    tracing::info!(uri = %req.uri(), "Rejected a malformed request body");
    BadRequest(Json(json!({ "error": "The request body could not be understood." })))
}
