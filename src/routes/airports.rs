use crate::airports::{Airport, AirportDirectory};
use rocket::serde::json::Json;
use rocket::State;
use std::sync::Arc;

#[tracing::instrument(name = "Airport search", skip(directory))]
#[get("/airports?<q>")]
pub fn search_airports(
    q: Option<&str>,
    directory: &State<Arc<AirportDirectory>>,
) -> Json<Vec<Airport>> {
    Json(directory.search(q.unwrap_or_default()))
}

#[get("/airports/<code>")]
pub fn get_airport(
    code: &str,
    directory: &State<Arc<AirportDirectory>>,
) -> Option<Json<Airport>> {
    directory.lookup(code).map(Json)
}
