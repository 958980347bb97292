//! Telegram Bot API transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use homework_common::error::DeliveryError;

use crate::MessageSender;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// The subset of the Bot API envelope we care about.
#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Delivers messages through `sendMessage` of the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramSender {
    api_url: String,
    token: String,
    client: Client,
}

impl TelegramSender {
    /// `api_url` is the Bot API base, e.g. `https://api.telegram.org`.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(api_url, token, Client::new())
    }

    pub fn with_client(
        api_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

impl std::fmt::Debug for TelegramSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSender")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // The URL embeds the token; keep it out of error text.
            .map_err(|e| DeliveryError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let reply = response.json::<BotApiReply>().await.ok();

        match reply {
            Some(BotApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(reply) => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: "unreadable reply".to_string(),
            }),
        }
    }
}
