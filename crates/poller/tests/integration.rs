//! Integration tests for the review API client and the poll loop.
//!
//! The loop is driven one cycle at a time through `run_cycle` with in-process
//! fakes; the HTTP client is exercised against a local one-shot responder.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use homework_common::error::{DeliveryError, EndpointError};
use homework_engine::cursor::PollCursor;
use homework_notifier::notifier::Delivery;
use homework_notifier::{MessageSender, Notifier};
use homework_poller::client::{HomeworkApi, PracticumClient};
use homework_poller::poller::{CycleOutcome, HomeworkPoller};
use homework_test_support::{closed_port_url, serve_once};

const START: i64 = 1_700_000_000;
const INTERVAL: Duration = Duration::from_secs(600);

// ============================================================
// Helpers
// ============================================================

/// Replays queued responses; once drained, the endpoint is unavailable.
#[derive(Clone, Default)]
struct FakeApi {
    responses: Arc<Mutex<VecDeque<Result<Value, EndpointError>>>>,
    requested: Arc<Mutex<Vec<i64>>>,
}

impl FakeApi {
    fn with(responses: Vec<Result<Value, EndpointError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            ..Self::default()
        }
    }

    fn requested(&self) -> Vec<i64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HomeworkApi for FakeApi {
    async fn poll(&self, from_date: i64) -> Result<Value, EndpointError> {
        self.requested.lock().unwrap().push(from_date);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(EndpointError::Unavailable))
    }
}

#[derive(Clone, Default)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingSender {
    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn make_poller<A: HomeworkApi>(
    api: A,
    sender: RecordingSender,
) -> HomeworkPoller<A, RecordingSender> {
    HomeworkPoller::new(api, Notifier::new(sender, "42"), INTERVAL)
        .with_cursor(PollCursor::starting_at(START))
}

// ============================================================
// Poll loop scenarios
// ============================================================

#[tokio::test]
async fn test_status_change_is_notified_and_cursor_advances() {
    let api = FakeApi::with(vec![Ok(json!({
        "homeworks": [{"homework_name": "hw1", "status": "approved"}],
        "current_date": 1_700_000_600
    }))]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api.clone(), sender.clone());

    let outcome = poller.run_cycle().await;

    let expected =
        "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!";
    assert_eq!(
        outcome,
        CycleOutcome::Notified {
            message: expected.to_string(),
            delivery: Delivery::Sent,
        }
    );
    assert_eq!(sender.sent(), vec![expected.to_string()]);
    assert_eq!(api.requested(), vec![START]);
    assert_eq!(poller.cursor().timestamp(), 1_700_000_600);
}

#[tokio::test]
async fn test_empty_homeworks_sends_nothing_but_advances_cursor() {
    let api = FakeApi::with(vec![Ok(json!({"homeworks": [], "current_date": START + 600}))]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    assert_eq!(poller.run_cycle().await, CycleOutcome::NothingNew);
    assert!(sender.sent().is_empty());
    assert_eq!(poller.cursor().timestamp(), START + 600);
}

#[tokio::test]
async fn test_missing_current_date_keeps_cursor() {
    let api = FakeApi::with(vec![Ok(json!({"homeworks": []}))]);
    let mut poller = make_poller(api, RecordingSender::default());

    poller.run_cycle().await;
    assert_eq!(poller.cursor().timestamp(), START);
}

#[tokio::test]
async fn test_fractional_current_date_advances_cursor() {
    let api = FakeApi::with(vec![Ok(json!({"homeworks": [], "current_date": 1_700_000_600.0}))]);
    let mut poller = make_poller(api, RecordingSender::default());

    poller.run_cycle().await;
    assert_eq!(poller.cursor().timestamp(), 1_700_000_600);
}

#[tokio::test]
async fn test_only_first_item_is_notified() {
    let api = FakeApi::with(vec![Ok(json!({
        "homeworks": [
            {"homework_name": "hw2", "status": "rejected"},
            {"homework_name": "hw1", "status": "approved"}
        ],
        "current_date": START + 600
    }))]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    poller.run_cycle().await;

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("\"hw2\""));
    assert!(sent[0].ends_with("Работа проверена: у ревьюера есть замечания."));
}

#[tokio::test]
async fn test_endpoint_failure_degrades_and_keeps_cursor() {
    let api = FakeApi::with(vec![Err(EndpointError::BadStatus { status: 503 })]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    let outcome = poller.run_cycle().await;

    let expected = "Program crash: API unavailable: status code is not 200";
    assert_eq!(outcome, CycleOutcome::Degraded(expected.to_string()));
    assert_eq!(sender.sent(), vec![expected.to_string()]);
    assert_eq!(poller.cursor().timestamp(), START);
}

#[tokio::test]
async fn test_json_failure_degrades() {
    let api = FakeApi::with(vec![Err(EndpointError::JsonConversion)]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    assert_eq!(
        poller.run_cycle().await,
        CycleOutcome::Degraded("Program crash: JSON conversion error".to_string())
    );
    assert_eq!(poller.cursor().timestamp(), START);
}

#[tokio::test]
async fn test_homeworks_not_a_list_degrades() {
    let api = FakeApi::with(vec![Ok(json!({
        "homeworks": "not-a-list",
        "current_date": START + 600
    }))]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    assert_eq!(
        poller.run_cycle().await,
        CycleOutcome::Degraded("Program crash: API is not a list".to_string())
    );
    assert_eq!(poller.cursor().timestamp(), START);
}

#[tokio::test]
async fn test_missing_homeworks_key_degrades_and_keeps_cursor() {
    let api = FakeApi::with(vec![Ok(json!({"current_date": START + 600}))]);
    let mut poller = make_poller(api, RecordingSender::default());

    assert_eq!(
        poller.run_cycle().await,
        CycleOutcome::Degraded("Program crash: There is no key homeworks".to_string())
    );
    assert_eq!(poller.cursor().timestamp(), START);
}

#[tokio::test]
async fn test_unknown_status_degrades_without_advancing() {
    let api = FakeApi::with(vec![Ok(json!({
        "homeworks": [{"homework_name": "hw1", "status": "on_hold"}],
        "current_date": START + 600
    }))]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    assert_eq!(
        poller.run_cycle().await,
        CycleOutcome::Degraded("Program crash: Unknown homework status: \"on_hold\"".to_string())
    );
    assert_eq!(poller.cursor().timestamp(), START);
}

#[tokio::test]
async fn test_repeated_failure_is_announced_once() {
    let api = FakeApi::with(vec![
        Err(EndpointError::Unavailable),
        Err(EndpointError::Unavailable),
        Err(EndpointError::JsonConversion),
        Err(EndpointError::Unavailable),
    ]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api, sender.clone());

    for _ in 0..4 {
        poller.run_cycle().await;
    }

    assert_eq!(
        sender.sent(),
        vec![
            "Program crash: Endpoint is unavailable".to_string(),
            "Program crash: JSON conversion error".to_string(),
        ]
    );
    assert_eq!(poller.reported_errors().len(), 2);
}

#[tokio::test]
async fn test_recovers_after_failure() {
    let api = FakeApi::with(vec![
        Err(EndpointError::Unavailable),
        Ok(json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": START + 1200
        })),
    ]);
    let sender = RecordingSender::default();
    let mut poller = make_poller(api.clone(), sender.clone());

    poller.run_cycle().await;
    poller.run_cycle().await;

    assert_eq!(api.requested(), vec![START, START]);
    assert_eq!(sender.sent().len(), 2);
    assert_eq!(poller.cursor().timestamp(), START + 1200);
}

#[tokio::test]
async fn test_cursor_never_decreases_across_cycles() {
    let api = FakeApi::with(vec![
        Ok(json!({"homeworks": [], "current_date": START + 600})),
        Ok(json!({"homeworks": [], "current_date": START + 300})),
        Ok(json!({"homeworks": []})),
        Ok(json!({"homeworks": [], "current_date": START + 1800})),
    ]);
    let mut poller = make_poller(api.clone(), RecordingSender::default());

    let mut previous = poller.cursor();
    for _ in 0..4 {
        poller.run_cycle().await;
        assert!(poller.cursor() >= previous);
        previous = poller.cursor();
    }

    assert_eq!(
        api.requested(),
        vec![START, START + 600, START + 600, START + 600]
    );
    assert_eq!(poller.cursor().timestamp(), START + 1800);
}

#[tokio::test(start_paused = true)]
async fn test_run_keeps_polling_at_fixed_interval() {
    let api = FakeApi::default();
    let sender = RecordingSender::default();
    let mut poller = make_poller(api.clone(), sender.clone());

    // Cycles at t=0, 600 and 1200; the timeout fires before the fourth.
    let result = tokio::time::timeout(Duration::from_secs(1500), poller.run()).await;

    assert!(result.is_err());
    assert_eq!(api.requested().len(), 3);
    assert_eq!(
        sender.sent(),
        vec!["Program crash: Endpoint is unavailable".to_string()]
    );
}

// ============================================================
// PracticumClient over HTTP
// ============================================================

#[tokio::test]
async fn test_client_sends_token_and_from_date() {
    let (url, request) = serve_once(200, r#"{"homeworks": [], "current_date": 1700000600}"#).await;
    let endpoint = format!("{}/api/user_api/homework_statuses/", url);
    let client = PracticumClient::new(endpoint.clone(), "secret");
    assert_eq!(client.endpoint(), endpoint);

    let body = client.poll(START).await.unwrap();
    assert_eq!(body, json!({"homeworks": [], "current_date": 1_700_000_600}));

    let request = request.await.unwrap();
    assert!(
        request.starts_with("GET /api/user_api/homework_statuses/?from_date=1700000000 ")
    );
    assert!(request.to_lowercase().contains("authorization: oauth secret"));
}

#[tokio::test]
async fn test_client_non_200_status() {
    let (url, _request) = serve_once(503, r#"{"error": "maintenance"}"#).await;
    let client = PracticumClient::new(url, "secret");

    assert_eq!(
        client.poll(START).await,
        Err(EndpointError::BadStatus { status: 503 })
    );
}

#[tokio::test]
async fn test_client_invalid_json() {
    let (url, _request) = serve_once(200, "<html>oops</html>").await;
    let client = PracticumClient::new(url, "secret");

    assert_eq!(client.poll(START).await, Err(EndpointError::JsonConversion));
}

#[tokio::test]
async fn test_client_connection_refused() {
    let client = PracticumClient::new(closed_port_url().await, "secret");

    assert_eq!(client.poll(START).await, Err(EndpointError::Unavailable));
}

#[tokio::test]
async fn test_client_malformed_endpoint_is_api_error() {
    let client = PracticumClient::new("not a url", "secret");

    let err = client.poll(START).await.unwrap_err();
    assert!(matches!(err, EndpointError::Api(_)));
    assert!(err.to_string().starts_with("API error: "));
}

#[tokio::test]
async fn test_bad_status_over_http_end_to_end() {
    let (url, _request) = serve_once(503, "").await;
    let sender = RecordingSender::default();
    let mut poller = make_poller(PracticumClient::new(url, "secret"), sender.clone());

    let outcome = poller.run_cycle().await;

    assert_eq!(
        outcome,
        CycleOutcome::Degraded("Program crash: API unavailable: status code is not 200".to_string())
    );
    assert_eq!(
        sender.sent(),
        vec!["Program crash: API unavailable: status code is not 200".to_string()]
    );
    assert_eq!(poller.cursor().timestamp(), START);
}
