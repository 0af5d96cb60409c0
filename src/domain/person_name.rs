use crate::domain::FieldError;
use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 256;
const FORBIDDEN_CHARACTERS: [char; 9] = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];

/// A first or last name, trimmed and checked for markup characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(field: &'static str, s: &str) -> Result<PersonName, FieldError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FieldError::MissingField(field));
        }
        let is_too_long = trimmed.graphemes(true).count() > MAX_GRAPHEMES;
        let contains_forbidden_characters =
            trimmed.chars().any(|g| FORBIDDEN_CHARACTERS.contains(&g));

        if is_too_long || contains_forbidden_characters {
            Err(FieldError::InvalidName(field))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
