use crate::domain::AttachmentRejection;
use serde::ser::SerializeSeq;

/// A single user-correctable problem with a submitted field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("{0} contains characters that are not allowed or is too long")]
    InvalidName(&'static str),
    #[error("phone number must contain at least {} digits", crate::domain::MIN_PHONE_DIGITS)]
    InvalidPhone,
    #[error("{field} must be a whole number of at least {minimum}")]
    InvalidQuantity { field: &'static str, minimum: u64 },
    #[error("route is incomplete: {0}")]
    IncompleteRoute(&'static str),
    #[error("{0}")]
    InvalidAttachment(AttachmentRejection),
}

impl FieldError {
    /// The form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::MissingField(field) | FieldError::InvalidName(field) => field,
            FieldError::InvalidEmail(_) => "email",
            FieldError::InvalidPhone => "phone",
            FieldError::InvalidQuantity { field, .. } => field,
            FieldError::IncompleteRoute(_) => "route",
            FieldError::InvalidAttachment(_) => "screenshot",
        }
    }

    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::MissingField(_) => "MissingField",
            FieldError::InvalidEmail(_) => "InvalidEmail",
            FieldError::InvalidName(_) => "InvalidName",
            FieldError::InvalidPhone => "InvalidPhone",
            FieldError::InvalidQuantity { .. } => "InvalidQuantity",
            FieldError::IncompleteRoute(_) => "IncompleteRoute",
            FieldError::InvalidAttachment(_) => "InvalidAttachment",
        }
    }
}

/// Every problem found in one payload, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record the error of a failed parse and hand back the value otherwise.
    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.code() == code)
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

#[derive(serde::Serialize)]
struct FieldErrorView<'a> {
    field: &'static str,
    code: &'static str,
    message: &'a str,
}

impl serde::Serialize for FieldErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for error in &self.0 {
            let message = error.to_string();
            seq.serialize_element(&FieldErrorView {
                field: error.field(),
                code: error.code(),
                message: &message,
            })?;
        }
        seq.end()
    }
}
