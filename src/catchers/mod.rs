mod not_found;
mod payload_too_large;
mod unprocessable_entity;

pub use not_found::*;
pub use payload_too_large::*;
pub use unprocessable_entity::*;
