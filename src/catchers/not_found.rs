use rocket::response::status::NotFound;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

#[catch(404)]
pub fn not_found_to_json(req: &Request) -> NotFound<Json<Value>> {
    NotFound(Json(json!({ "error": format!("Nothing found at {}", req.uri()) })))
}
