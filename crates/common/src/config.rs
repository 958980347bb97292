use std::time::Duration;

use crate::error::ConfigError;

/// Default review API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default pause between poll cycles, in seconds.
pub const DEFAULT_RETRY_TIME_SECS: u64 = 600;

/// Default append target for the log sink.
pub const DEFAULT_LOG_FILE: &str = "program.log";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: String,

    /// Review API URL polled each cycle
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Sleep between cycles (default: 600 seconds)
    pub retry_interval: Duration,

    /// Log file, opened in append mode
    pub log_file: String,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// All three required variables are checked before failing, so the error
    /// names every one that is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let practicum_token = non_empty("PRACTICUM_TOKEN");
        let telegram_token = non_empty("TELEGRAM_TOKEN");
        let telegram_chat_id = non_empty("TELEGRAM_CHAT_ID");

        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (practicum_token.clone(), telegram_token.clone(), telegram_chat_id.clone())
        else {
            let missing: Vec<&str> = [
                ("PRACTICUM_TOKEN", practicum_token.is_none()),
                ("TELEGRAM_TOKEN", telegram_token.is_none()),
                ("TELEGRAM_CHAT_ID", telegram_chat_id.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(ConfigError::Missing(missing.join(", ")));
        };

        let retry_secs = match non_empty("RETRY_TIME_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "RETRY_TIME_SECS".to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_RETRY_TIME_SECS,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: non_empty("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: non_empty("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_interval: Duration::from_secs(retry_secs),
            log_file: non_empty("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_interval", &self.retry_interval)
            .field("log_file", &self.log_file)
            .finish()
    }
}
