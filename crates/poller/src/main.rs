use homework_common::config::AppConfig;
use homework_common::logging::{init_tracing, log_file_from_env};
use homework_notifier::{Notifier, TelegramSender};
use homework_poller::client::PracticumClient;
use homework_poller::poller::HomeworkPoller;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing(&log_file_from_env());

    tracing::info!("Homework bot starting...");

    // Load configuration; missing tokens stop the process here
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Token verification failed");
            return Err(e.into());
        }
    };

    let api = PracticumClient::new(&config.endpoint, &config.practicum_token);
    tracing::info!(endpoint = %api.endpoint(), "Starting homework poller");

    let sender = TelegramSender::new(&config.telegram_api_url, &config.telegram_token);
    let notifier = Notifier::new(sender, &config.telegram_chat_id);

    let mut poller = HomeworkPoller::new(api, notifier, config.retry_interval);

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Homework bot stopped.");
    Ok(())
}
