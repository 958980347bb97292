//! In-memory set of error messages that were already announced.
//!
//! Lives for the whole process and is never cleared, so each distinct error
//! text is announced once. Growth is bounded only by the number of distinct
//! messages, which in practice is a handful.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ErrorDedupSet {
    seen: HashSet<String>,
}

impl ErrorDedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message`. Returns `true` if it had not been seen before.
    pub fn check_and_insert(&mut self, message: &str) -> bool {
        if self.seen.contains(message) {
            tracing::debug!(message, "Error notification already reported, suppressed");
            return false;
        }
        self.seen.insert(message.to_string());
        true
    }

    pub fn contains(&self, message: &str) -> bool {
        self.seen.contains(message)
    }

    /// Number of distinct messages recorded (for monitoring).
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
