use crate::domain::{Booking, Status};
use crate::schema::bookings;
use chrono::offset::Utc;
use chrono::{DateTime, NaiveDate};
use diesel::{Insertable, Queryable, Selectable};

#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub struct BookingRow {
    pub id: uuid::Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_country: Option<String>,
    pub from_airport_code: String,
    pub to_airport_code: String,
    pub departure_date: NaiveDate,
    pub airline: String,
    pub points_required: i64,
    pub flight_details: String,
    pub screenshot_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow<'a> {
    pub id: &'a uuid::Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub phone_country: Option<&'a str>,
    pub from_airport_code: &'a str,
    pub to_airport_code: &'a str,
    pub departure_date: &'a NaiveDate,
    pub airline: &'a str,
    pub points_required: i64,
    pub flight_details: &'a str,
    pub screenshot_url: Option<&'a str>,
    pub status: &'a str,
    pub created_at: &'a DateTime<Utc>,
    pub updated_at: &'a DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = anyhow::Error;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            status: Status::parse(&row.status)?,
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            phone_country: row.phone_country,
            from_airport_code: row.from_airport_code,
            to_airport_code: row.to_airport_code,
            departure_date: row.departure_date,
            airline: row.airline,
            points_required: row.points_required,
            flight_details: row.flight_details,
            screenshot_url: row.screenshot_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
