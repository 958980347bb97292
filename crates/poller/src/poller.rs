use std::time::Duration;

use homework_common::error::CycleError;
use homework_engine::cursor::PollCursor;
use homework_engine::dedup::ErrorDedupSet;
use homework_engine::{formatter, validator};
use homework_notifier::notifier::Delivery;
use homework_notifier::{MessageSender, Notifier};

use crate::client::HomeworkApi;

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found and a notification attempted.
    Notified { message: String, delivery: Delivery },
    /// The response was valid but carried no work items.
    NothingNew,
    /// The cycle failed; the payload is the error notification text.
    Degraded(String),
}

/// Long-running poller that relays homework status changes to the chat.
pub struct HomeworkPoller<A, S> {
    api: A,
    notifier: Notifier<S>,
    cursor: PollCursor,
    /// Error texts already announced, kept for the lifetime of the poller.
    reported_errors: ErrorDedupSet,
    retry_interval: Duration,
}

impl<A: HomeworkApi, S: MessageSender> HomeworkPoller<A, S> {
    /// Create a poller whose first window starts now.
    pub fn new(api: A, notifier: Notifier<S>, retry_interval: Duration) -> Self {
        Self {
            api,
            notifier,
            cursor: PollCursor::now(),
            reported_errors: ErrorDedupSet::new(),
            retry_interval,
        }
    }

    /// Start the first window at a specific cursor instead of now.
    pub fn with_cursor(mut self, cursor: PollCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn reported_errors(&self) -> &ErrorDedupSet {
        &self.reported_errors
    }

    /// Start the polling loop. Never returns; stop it by dropping the future.
    pub async fn run(&mut self) {
        tracing::info!(
            cursor = self.cursor.timestamp(),
            retry_interval_secs = self.retry_interval.as_secs(),
            chat_id = %self.notifier.chat_id(),
            "Homework poller started"
        );

        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Run one poll cycle. Every failure is absorbed here.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = format!("Program crash: {}", e);
                tracing::error!(cursor = self.cursor.timestamp(), "{}", message);
                self.notifier
                    .notify_error(&message, &mut self.reported_errors)
                    .await;
                CycleOutcome::Degraded(message)
            }
        }
    }

    /// Poll, validate, notify about the newest item, then advance the cursor.
    ///
    /// Any error returns before the cursor moves.
    async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let raw = self.api.poll(self.cursor.timestamp()).await?;
        let response = validator::check_response(&raw)?;

        let outcome = match response.homeworks.first() {
            Some(item) => {
                if response.homeworks.len() > 1 {
                    tracing::debug!(
                        skipped = response.homeworks.len() - 1,
                        "Only the first homework is reported per cycle"
                    );
                }
                let message = formatter::format(item)?;
                let delivery = self.notifier.notify(&message).await;
                CycleOutcome::Notified { message, delivery }
            }
            None => {
                tracing::debug!("No homework status changes");
                CycleOutcome::NothingNew
            }
        };

        self.cursor.advance(response.current_date);
        Ok(outcome)
    }
}
