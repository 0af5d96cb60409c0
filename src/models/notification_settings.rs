use crate::schema::notification_settings;
use chrono::offset::Utc;
use chrono::DateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};

/// The single row holding the staff-editable notification switches.
pub const NOTIFICATION_SETTINGS_ROW: i32 = 1;

#[derive(Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = notification_settings)]
pub struct NotificationSettingsRow {
    pub id: i32,
    pub enabled: bool,
    pub admin_emails: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
