mod booking;
mod lead;
mod notification_settings;

pub use booking::*;
pub use lead::*;
pub use notification_settings::*;
