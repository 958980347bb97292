use serde_json::Value;

use crate::error::UnknownStatusError;

/// Review status of a homework submission, as reported by the review API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// All recognized statuses, in catalog order.
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for HomeworkStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(UnknownStatusError {
                status: other.to_string(),
            }),
        }
    }
}

/// One homework submission record from the `homeworks` array.
///
/// Both fields are optional on the wire; a missing status is rejected later by
/// the formatter, a missing name renders as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkItem {
    /// `homework_name`, or `name` when the former is absent.
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

impl WorkItem {
    /// Read a work item out of an arbitrary JSON value.
    ///
    /// Never fails: non-object values and non-string fields simply yield `None`.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            homework_name: field("homework_name").or_else(|| field("name")),
            status: field("status"),
        }
    }
}

/// A validated poll response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Work items in server order. Empty means nothing changed in the window.
    pub homeworks: Vec<WorkItem>,
    /// Server clock at the time of the response, used as the next cursor.
    pub current_date: Option<i64>,
}
