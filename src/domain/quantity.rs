use crate::domain::FieldError;

/// Smallest number of points a reward booking may require.
pub const MIN_POINTS: u64 = 1;

/// A positive miles or points amount at or above the flow's minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i64);

impl Quantity {
    /// Accepts plain integers and thousands-separated input (`50,000`).
    pub fn parse(field: &'static str, raw: &str, minimum: u64) -> Result<Quantity, FieldError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
            .collect();
        if cleaned.is_empty() {
            return Err(FieldError::MissingField(field));
        }
        let invalid = FieldError::InvalidQuantity { field, minimum };
        let value: u64 = cleaned.parse().map_err(|_| invalid.clone())?;
        if value < minimum.max(1) {
            return Err(invalid);
        }
        i64::try_from(value).map(Self).map_err(|_| invalid)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}
