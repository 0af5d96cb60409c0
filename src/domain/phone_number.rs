use crate::domain::FieldError;

pub const MIN_PHONE_DIGITS: usize = 8;

/// A phone number as the submitter typed it, plus the country the phone
/// input widget reported.
///
/// Only the digit count is checked; formatting is preserved for staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    formatted: String,
    country: Option<String>,
}

impl PhoneNumber {
    pub fn parse(formatted: &str, country: Option<&str>) -> Result<PhoneNumber, FieldError> {
        let formatted = formatted.trim();
        if formatted.is_empty() {
            return Err(FieldError::MissingField("phone"));
        }
        if digit_count(formatted) < MIN_PHONE_DIGITS {
            return Err(FieldError::InvalidPhone);
        }
        Ok(Self {
            formatted: formatted.to_string(),
            country: country.and_then(normalize_country),
        })
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    /// ISO 3166 alpha-2 code (`AE`) or dialling prefix (`+971`).
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

fn normalize_country(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let dial = raw.strip_prefix('+').unwrap_or(raw);
    if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(raw.to_ascii_uppercase())
    } else if (1..=4).contains(&dial.len()) && dial.chars().all(|c| c.is_ascii_digit()) {
        Some(format!("+{}", dial))
    } else {
        None
    }
}
