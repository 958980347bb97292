//! Outbound delivery of notifications to the chat.
//!
//! `MessageSender` is the transport seam; `TelegramSender` is the production
//! implementation. `Notifier` adds the delivery policy on top: status messages
//! always go out, error messages go out once per distinct text.

pub mod notifier;
pub mod telegram;

use async_trait::async_trait;

use homework_common::error::DeliveryError;

pub use notifier::Notifier;
pub use telegram::TelegramSender;

/// Sends a plain text message to a chat.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}
