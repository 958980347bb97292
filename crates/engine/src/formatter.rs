//! Turns a work item into the chat message text.

use homework_common::error::UnknownStatusError;
use homework_common::types::WorkItem;

use crate::catalog;

/// Shown in place of a missing homework name.
const MISSING_NAME: &str = "unknown";

/// Render the notification for one work item.
///
/// Fails when the status is missing or outside the catalog, which means the
/// upstream API changed.
pub fn format(item: &WorkItem) -> Result<String, UnknownStatusError> {
    let status = item.status.as_deref().unwrap_or_default();
    let verdict = catalog::lookup(status).inspect_err(|e| {
        tracing::error!(status, error = %e, "Unexpected homework status");
    })?;
    let name = item.homework_name.as_deref().unwrap_or(MISSING_NAME);

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name, verdict
    ))
}
