use crate::domain::FieldError;
use chrono::NaiveDate;

/// Anything that can tell whether an airport code exists.
pub trait AirportCatalog {
    fn is_known(&self, code: &str) -> bool;
}

/// Origin, destination and departure date of a reward-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    from: String,
    to: String,
    departure: NaiveDate,
}

impl Route {
    /// Both codes must resolve in `airports` and differ; the departure date
    /// (`YYYY-MM-DD`) may not be before `today`.
    pub fn parse(
        from: &str,
        to: &str,
        departure: &str,
        today: NaiveDate,
        airports: &dyn AirportCatalog,
    ) -> Result<Route, FieldError> {
        let from = from.trim().to_ascii_uppercase();
        let to = to.trim().to_ascii_uppercase();
        if from.is_empty() || to.is_empty() {
            return Err(FieldError::IncompleteRoute(
                "both departure and arrival airports are required",
            ));
        }
        if from == to {
            return Err(FieldError::IncompleteRoute(
                "departure and arrival airports must differ",
            ));
        }
        if !airports.is_known(&from) || !airports.is_known(&to) {
            return Err(FieldError::IncompleteRoute("unknown airport code"));
        }
        let departure = departure.trim();
        if departure.is_empty() {
            return Err(FieldError::IncompleteRoute("departure date is required"));
        }
        let departure = NaiveDate::parse_from_str(departure, "%Y-%m-%d")
            .map_err(|_| FieldError::IncompleteRoute("departure date is not a valid date"))?;
        if departure < today {
            return Err(FieldError::IncompleteRoute(
                "departure date is in the past",
            ));
        }
        Ok(Self {
            from,
            to,
            departure,
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn departure(&self) -> NaiveDate {
        self.departure
    }
}
