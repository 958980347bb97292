//! Verdict catalog: the fixed status → human-readable text mapping.

use homework_common::error::UnknownStatusError;
use homework_common::types::HomeworkStatus;

/// Human-readable verdict for a recognized status.
pub fn verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
        HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
        HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
    }
}

/// Look up the verdict for a raw status string from the API.
pub fn lookup(status: &str) -> Result<&'static str, UnknownStatusError> {
    status.parse::<HomeworkStatus>().map(verdict)
}
