//! Shape checks on the decoded API payload.
//!
//! Checks run in a fixed order (object, key present, key is an array) so each
//! failure mode yields its own error.

use serde_json::Value;

use homework_common::error::ShapeError;
use homework_common::types::{ApiResponse, WorkItem};

/// Extract the `homeworks` array, unmodified and possibly empty.
pub fn extract_work_items(response: &Value) -> Result<Vec<WorkItem>, ShapeError> {
    let Some(object) = response.as_object() else {
        tracing::error!("API is not a dictionary");
        return Err(ShapeError::NotADictionary);
    };

    let Some(homeworks) = object.get("homeworks") else {
        tracing::error!("There is no key homeworks");
        return Err(ShapeError::MissingHomeworks);
    };

    let Some(items) = homeworks.as_array() else {
        tracing::error!("API is not a list");
        return Err(ShapeError::NotAList);
    };

    Ok(items.iter().map(WorkItem::from_value).collect())
}

/// Validate a response and pick out the server clock alongside the items.
///
/// A fractional `current_date` is truncated to whole seconds; any other
/// non-numeric value is treated as absent.
pub fn check_response(response: &Value) -> Result<ApiResponse, ShapeError> {
    let homeworks = extract_work_items(response)?;
    let current_date = response.get("current_date").and_then(read_timestamp);

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

fn read_timestamp(value: &Value) -> Option<i64> {
    if let Some(seconds) = value.as_i64() {
        return Some(seconds);
    }
    match value.as_f64() {
        Some(seconds) if seconds.is_finite() => Some(seconds.trunc() as i64),
        _ => {
            tracing::warn!(current_date = %value, "Ignoring non-numeric current_date");
            None
        }
    }
}
