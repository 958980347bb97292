//! Lower bound of the next poll window.

use chrono::Utc;

/// Timestamp (seconds since epoch) passed as `from_date` on the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(i64);

impl PollCursor {
    /// Start a cursor at the current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Start a cursor at `timestamp`; zero or negative means "now".
    pub fn starting_at(timestamp: i64) -> Self {
        if timestamp <= 0 {
            Self::now()
        } else {
            Self(timestamp)
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Move the cursor to the server-reported `current_date`.
    ///
    /// Absent dates leave the cursor as is. Dates older than the cursor are
    /// ignored so the cursor never moves backwards.
    pub fn advance(&mut self, current_date: Option<i64>) {
        match current_date {
            Some(date) if date >= self.0 => self.0 = date,
            Some(date) => {
                tracing::warn!(
                    cursor = self.0,
                    current_date = date,
                    "Server date is older than cursor, keeping cursor"
                );
            }
            None => {}
        }
    }
}
