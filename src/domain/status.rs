use serde::{Deserialize, Serialize};

/// Where a lead or booking stands in staff handling.
///
/// Staff may move a record to any status; `next_suggested` only lists what
/// the tooling offers by default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    New,
    Contacted,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid status. Use one of: new, contacted, in_progress, completed, cancelled.")]
pub struct StatusParseError(pub String);

impl Status {
    pub const ALL: [Status; 5] = [
        Status::New,
        Status::Contacted,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Contacted => "contacted",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Contacted => "Contacted",
            Status::InProgress => "In progress",
            Status::Completed => "Completed",
            Status::Cancelled => "Cancelled",
        }
    }

    /// Accepts the stored form and the human spelling `in progress`.
    pub fn parse(s: &str) -> Result<Status, StatusParseError> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "contacted" => Ok(Status::Contacted),
            "in_progress" | "in progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "cancelled" => Ok(Status::Cancelled),
            _ => Err(StatusParseError(s.to_string())),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }

    pub fn next_suggested(&self) -> Vec<Status> {
        match self {
            Status::New => vec![Status::Contacted, Status::Cancelled],
            Status::Contacted => vec![Status::InProgress, Status::Cancelled],
            Status::InProgress => vec![Status::Completed, Status::Cancelled],
            Status::Completed | Status::Cancelled => vec![],
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s)
    }
}
