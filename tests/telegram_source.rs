//! Telegram Bot API source against a mock server

use chrono::Utc;
use options_sentiment::config::TelegramConfig;
use options_sentiment::source::{fetch_messages, FetchWindow, MessageSource, TelegramSource};
use options_sentiment::Error;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:TEST";

fn source_for(server: &MockServer, channel: &str) -> TelegramSource {
    let config = TelegramConfig {
        api_base: server.uri(),
        bot_token: TOKEN.to_string(),
        channel: channel.to_string(),
        timeout_secs: 5,
    };
    TelegramSource::new(&config).unwrap()
}

fn channel_post(update_id: i64, message_id: i64, age_secs: i64, username: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": update_id,
        "channel_post": {
            "message_id": message_id,
            "date": Utc::now().timestamp() - age_secs,
            "chat": {"id": -1001234567890_i64, "type": "channel", "username": username, "title": "Flow"},
            "text": text
        }
    })
}

#[tokio::test]
async fn fetches_channel_posts_newest_first() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "ok": true,
        "result": [
            channel_post(1, 10, 600, "optionsflow", "BTC long call (2x)"),
            channel_post(2, 11, 300, "otherchannel", "ETH long put (9x)"),
            {"update_id": 3, "message": {"message_id": 5, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "hi"}},
            channel_post(4, 12, 60, "OptionsFlow", "ETH short call spread"),
            {
                "update_id": 5,
                "edited_channel_post": {
                    "message_id": 10,
                    "date": Utc::now().timestamp() - 600,
                    "chat": {"id": -1001234567890_i64, "type": "channel", "username": "optionsflow"},
                    "text": "BTC long call (3x)"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server, "@optionsflow");
    let messages = source.recent_messages(500).await.unwrap();

    let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["ETH short call spread", "BTC long call (3x)"]);
}

#[tokio::test]
async fn windowed_fetch_drops_old_posts() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "ok": true,
        "result": [
            channel_post(1, 1, 3 * 3600, "optionsflow", "BTC long put (4x)"),
            channel_post(2, 2, 1800, "optionsflow", "SOL long call"),
            channel_post(3, 3, 600, "optionsflow", "BTC long call")
        ]
    });

    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = source_for(&server, "optionsflow");
    let window = FetchWindow {
        limit: 500,
        hours_back: 2,
    };
    let messages = fetch_messages(&source, &window, Utc::now()).await.unwrap();
    assert_eq!(messages, vec!["BTC long call"]);
}

#[tokio::test]
async fn api_error_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let source = source_for(&server, "@optionsflow");
    match source.recent_messages(10).await {
        Err(Error::Telegram(description)) => assert_eq!(description, "Unauthorized"),
        other => panic!("expected Telegram error, got {:?}", other),
    }
}

#[tokio::test]
async fn newest_posts_survive_a_long_backlog() {
    let server = MockServer::start().await;

    let stale: Vec<serde_json::Value> = (1..=100)
        .map(|id| channel_post(id, id, 48 * 3600, "optionsflow", "BTC long put (5x)"))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": stale})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(query_param("offset", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": [channel_post(101, 101, 60, "optionsflow", "BTC long call (2x)")]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server, "@optionsflow");

    let recent = source.recent_messages(50).await.unwrap();
    assert_eq!(recent.len(), 50);
    assert_eq!(recent[0].text, "BTC long call (2x)");
}

#[tokio::test]
async fn windowed_fetch_after_paging() {
    let server = MockServer::start().await;

    let stale: Vec<serde_json::Value> = (1..=100)
        .map(|id| channel_post(id, id, 48 * 3600, "optionsflow", "ETH short call (3x)"))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": stale})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(query_param("offset", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": [channel_post(101, 101, 60, "optionsflow", "BTC long call (2x)")]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let source = source_for(&server, "optionsflow");
    let window = FetchWindow {
        limit: 50,
        hours_back: 24,
    };
    let messages = fetch_messages(&source, &window, Utc::now()).await.unwrap();
    assert_eq!(messages, vec!["BTC long call (2x)"]);
}

#[tokio::test]
async fn gateway_error_page_is_a_telegram_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_string("<html><body><h1>502 Bad Gateway</h1></body></html>"),
        )
        .mount(&server)
        .await;

    let source = source_for(&server, "@optionsflow");
    match source.recent_messages(10).await {
        Err(Error::Telegram(message)) => assert!(message.contains("502"), "{}", message),
        other => panic!("expected Telegram error, got {:?}", other),
    }
}
