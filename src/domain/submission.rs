use crate::domain::{
    AirportCatalog, Attachment, AttachmentUpload, FieldError, FieldErrors, PersonName,
    PhoneNumber, Quantity, Route, SubmitterEmail, MIN_POINTS,
};
use chrono::NaiveDate;

/// Raw fields of the "buy miles" form.
#[derive(Debug, Clone, Default)]
pub struct LeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_country: Option<String>,
    pub airline: String,
    pub miles_amount: String,
    pub message: Option<String>,
}

/// Raw fields of the "book a reward flight" form.
#[derive(Debug, Clone, Default)]
pub struct BookingPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_country: Option<String>,
    pub from_airport_code: String,
    pub to_airport_code: String,
    pub departure_date: String,
    pub airline: String,
    pub points_required: String,
    pub flight_details: String,
    pub screenshot: Option<AttachmentUpload>,
}

#[derive(Debug, Clone)]
pub struct NewLead {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: SubmitterEmail,
    pub phone: PhoneNumber,
    pub airline: String,
    pub miles_amount: Quantity,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: SubmitterEmail,
    pub phone: PhoneNumber,
    pub route: Route,
    pub airline: String,
    pub points_required: Quantity,
    pub flight_details: String,
    pub screenshot: Option<Attachment>,
}

impl LeadPayload {
    pub fn validate(self, minimum_miles: u64) -> Result<NewLead, FieldErrors> {
        let mut errors = FieldErrors::default();
        let first_name = errors.check(PersonName::parse("first_name", &self.first_name));
        let last_name = errors.check(PersonName::parse("last_name", &self.last_name));
        let email = errors.check(parse_email(self.email));
        let phone = errors.check(PhoneNumber::parse(
            &self.phone,
            self.phone_country.as_deref(),
        ));
        let airline = errors.check(required_text("airline", &self.airline));
        let miles_amount =
            errors.check(Quantity::parse("miles_amount", &self.miles_amount, minimum_miles));

        match (first_name, last_name, email, phone, airline, miles_amount) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(airline),
                Some(miles_amount),
            ) if errors.is_empty() => Ok(NewLead {
                first_name,
                last_name,
                email,
                phone,
                airline,
                miles_amount,
                message: optional_text(self.message),
            }),
            _ => Err(errors),
        }
    }
}

impl BookingPayload {
    pub fn validate(
        self,
        today: NaiveDate,
        airports: &dyn AirportCatalog,
    ) -> Result<NewBooking, FieldErrors> {
        let mut errors = FieldErrors::default();
        let first_name = errors.check(PersonName::parse("first_name", &self.first_name));
        let last_name = errors.check(PersonName::parse("last_name", &self.last_name));
        let email = errors.check(parse_email(self.email));
        let phone = errors.check(PhoneNumber::parse(
            &self.phone,
            self.phone_country.as_deref(),
        ));
        let route = errors.check(Route::parse(
            &self.from_airport_code,
            &self.to_airport_code,
            &self.departure_date,
            today,
            airports,
        ));
        let airline = errors.check(required_text("airline", &self.airline));
        let points_required = errors.check(Quantity::parse(
            "points_required",
            &self.points_required,
            MIN_POINTS,
        ));
        let flight_details = errors.check(required_text("flight_details", &self.flight_details));
        let screenshot = match self.screenshot {
            Some(upload) => errors.check(Attachment::parse(upload)).map(Some),
            None => Some(None),
        };

        match (
            first_name,
            last_name,
            email,
            phone,
            route,
            airline,
            points_required,
            flight_details,
            screenshot,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(route),
                Some(airline),
                Some(points_required),
                Some(flight_details),
                Some(screenshot),
            ) if errors.is_empty() => Ok(NewBooking {
                first_name,
                last_name,
                email,
                phone,
                route,
                airline,
                points_required,
                flight_details,
                screenshot,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_email(raw: String) -> Result<SubmitterEmail, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::MissingField("email"));
    }
    SubmitterEmail::parse(raw.clone()).map_err(|_| FieldError::InvalidEmail(raw))
}

fn required_text(field: &'static str, raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(FieldError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
