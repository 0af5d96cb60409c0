#[macro_use]
extern crate rocket;

pub mod airports;
pub mod attachments;
pub mod catchers;
pub mod configuration;
pub mod domain;
pub mod email;
pub mod intake;
pub mod models;
pub mod notifications;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod telemetry;
