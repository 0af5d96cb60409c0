use crate::domain::{Lead, Status};
use crate::schema::leads;
use chrono::offset::Utc;
use chrono::DateTime;
use diesel::{Insertable, Queryable, Selectable};

#[derive(Queryable, Selectable)]
#[diesel(table_name = leads)]
pub struct LeadRow {
    pub id: uuid::Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_country: Option<String>,
    pub airline: String,
    pub miles_amount: i64,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = leads)]
pub struct NewLeadRow<'a> {
    pub id: &'a uuid::Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub phone_country: Option<&'a str>,
    pub airline: &'a str,
    pub miles_amount: i64,
    pub message: Option<&'a str>,
    pub status: &'a str,
    pub created_at: &'a DateTime<Utc>,
    pub updated_at: &'a DateTime<Utc>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = anyhow::Error;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        Ok(Lead {
            status: Status::parse(&row.status)?,
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            phone_country: row.phone_country,
            airline: row.airline,
            miles_amount: row.miles_amount,
            message: row.message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
