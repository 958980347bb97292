//! Delivery policy over a `MessageSender`.

use homework_engine::dedup::ErrorDedupSet;

use crate::MessageSender;

/// What happened to one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The transport failed; the failure was logged and swallowed.
    Failed,
    /// Identical error text was already announced; nothing was sent.
    Suppressed,
}

/// Sends notifications to one fixed chat.
pub struct Notifier<S> {
    sender: S,
    chat_id: String,
}

impl<S: MessageSender> Notifier<S> {
    pub fn new(sender: S, chat_id: impl Into<String>) -> Self {
        Self {
            sender,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send `message` once. Delivery errors are logged, never returned.
    pub async fn notify(&self, message: &str) -> Delivery {
        match self.sender.send_message(&self.chat_id, message).await {
            Ok(()) => {
                tracing::info!(chat_id = %self.chat_id, "Message delivered");
                Delivery::Sent
            }
            Err(e) => {
                tracing::error!(chat_id = %self.chat_id, error = %e, "Message delivery failed");
                Delivery::Failed
            }
        }
    }

    /// Send an error notification unless the same text was announced before.
    ///
    /// The text is recorded before sending, so a failed delivery is not
    /// retried on the next cycle either.
    pub async fn notify_error(&self, message: &str, seen: &mut ErrorDedupSet) -> Delivery {
        if !seen.check_and_insert(message) {
            return Delivery::Suppressed;
        }
        self.notify(message).await
    }
}
