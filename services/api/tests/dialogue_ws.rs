//! Integration tests for the speaker-match dialogue over WebSocket.

mod common;

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use common::{start_server, TEST_TIMEOUT};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(reply_delay: Duration) -> Client {
    let port = start_server(Arc::default(), Arc::default(), reply_delay).await;
    let (ws, _resp) = connect_async(format!("ws://127.0.0.1:{port}/dialogue/ws"))
        .await
        .expect("WS connect failed");
    ws
}

async fn recv(ws: &mut Client) -> Value {
    loop {
        match ws.next().await.unwrap().unwrap() {
            Message::Text(txt) => return serde_json::from_str(&txt).expect("invalid JSON from server"),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("expected Text frame, got {:?}", other),
        }
    }
}

async fn send(ws: &mut Client, message: Value) {
    ws.send(Message::Text(message.to_string().into())).await.unwrap();
}

/// Reads the initial transcript + options pair.
async fn expect_sync(ws: &mut Client) -> (Value, Value) {
    let transcript = recv(ws).await;
    assert_eq!(transcript["type"], "transcript");
    let options = recv(ws).await;
    assert_eq!(options["type"], "options");
    (transcript, options)
}

#[tokio::test]
async fn connect_receives_greeting_and_opening_question() {
    timeout(TEST_TIMEOUT, async {
        let mut ws = connect(Duration::ZERO).await;

        let (transcript, options) = expect_sync(&mut ws).await;

        let entries = transcript["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["is_bot"], true);
        assert!(entries[0]["text"].as_str().unwrap().starts_with("Hi!"));

        assert_eq!(options["question_id"], "Q1");
        assert_eq!(options["resolved"], false);
        assert_eq!(options["options"].as_array().unwrap().len(), 4);
        assert_eq!(options["options"][1]["path"], "tech");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn answers_walk_the_branch_to_a_resolution() {
    timeout(TEST_TIMEOUT, async {
        let mut ws = connect(Duration::ZERO).await;
        expect_sync(&mut ws).await;

        let mut seen = vec!["Q1".to_string()];
        loop {
            send(&mut ws, json!({"type": "answer", "option_index": 1})).await;

            let user = recv(&mut ws).await;
            assert_eq!(user["type"], "entry");
            assert_eq!(user["entry"]["is_bot"], false);

            let remark = recv(&mut ws).await;
            assert_eq!(remark["entry"]["is_bot"], true);

            let next = recv(&mut ws).await;
            if next["type"] == "options" {
                // The resolution sentence needs no follow-up prompt.
                assert_eq!(next["resolved"], true);
                assert!(next["options"].as_array().unwrap().is_empty());
                let text = remark["entry"]["text"].as_str().unwrap();
                assert!(text.contains("Mukesh Jain"), "{text}");
                break;
            }

            assert_eq!(next["entry"]["is_bot"], true);
            let options = recv(&mut ws).await;
            assert_eq!(options["type"], "options");
            assert_eq!(options["prompt"], next["entry"]["text"]);
            seen.push(options["question_id"].as_str().unwrap().to_string());
        }

        assert_eq!(seen, ["Q1", "Q2_tech", "Q3_tech", "Q4_tech", "Q5"]);

        send(&mut ws, json!({"type": "answer", "option_index": 0})).await;
        let error = recv(&mut ws).await;
        assert_eq!(error["type"], "error");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn answer_during_a_pending_reply_is_refused_and_reset_cancels_it() {
    timeout(TEST_TIMEOUT, async {
        // Long enough that the reply can never land within the test.
        let mut ws = connect(Duration::from_secs(60)).await;
        expect_sync(&mut ws).await;

        send(&mut ws, json!({"type": "answer", "option_index": 0})).await;
        let user = recv(&mut ws).await;
        assert_eq!(user["entry"]["is_bot"], false);

        send(&mut ws, json!({"type": "answer", "option_index": 2})).await;
        let refused = recv(&mut ws).await;
        assert_eq!(refused["type"], "error");

        send(&mut ws, json!({"type": "reset"})).await;
        let (transcript, options) = expect_sync(&mut ws).await;
        assert_eq!(transcript["entries"].as_array().unwrap().len(), 1);
        assert_eq!(options["question_id"], "Q1");

        // The fresh session accepts answers again.
        send(&mut ws, json!({"type": "answer", "option_index": 3})).await;
        let user = recv(&mut ws).await;
        assert_eq!(user["type"], "entry");
        assert_eq!(user["entry"]["is_bot"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reset_sync_is_never_followed_by_a_stale_reply() {
    timeout(Duration::from_secs(20), async {
        let mut ws = connect(Duration::ZERO).await;
        expect_sync(&mut ws).await;

        for _ in 0..100 {
            send(&mut ws, json!({"type": "answer", "option_index": 0})).await;
            send(&mut ws, json!({"type": "reset"})).await;

            // Whatever the reply managed to send lands before the reset's sync.
            loop {
                let message = recv(&mut ws).await;
                if message["type"] == "transcript" {
                    assert_eq!(message["entries"].as_array().unwrap().len(), 1);
                    break;
                }
                assert_ne!(message["type"], "error", "{message}");
            }
            let options = recv(&mut ws).await;
            assert_eq!(options["type"], "options");
            assert_eq!(options["question_id"], "Q1");

            // The next message must answer this request, not a cancelled turn.
            send(&mut ws, json!({"type": "ask_faq", "index": 0})).await;
            let question = recv(&mut ws).await;
            assert_eq!(question["type"], "entry", "{question}");
            assert_eq!(question["entry"]["text"], "What types of speakers do you have?");
            let answer = recv(&mut ws).await;
            assert_eq!(answer["entry"]["is_bot"], true);
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn faq_question_gets_an_immediate_answer() {
    timeout(TEST_TIMEOUT, async {
        let mut ws = connect(Duration::ZERO).await;
        expect_sync(&mut ws).await;

        send(&mut ws, json!({"type": "ask_faq", "index": 1})).await;
        let question = recv(&mut ws).await;
        let answer = recv(&mut ws).await;
        assert_eq!(question["entry"]["text"], "How can I book a speaker?");
        assert_eq!(question["entry"]["is_bot"], false);
        assert_eq!(answer["entry"]["is_bot"], true);

        send(&mut ws, json!({"type": "ask_faq", "index": 9})).await;
        assert_eq!(recv(&mut ws).await["type"], "error");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn malformed_message_keeps_the_session_usable() {
    timeout(TEST_TIMEOUT, async {
        let mut ws = connect(Duration::ZERO).await;
        expect_sync(&mut ws).await;

        send(&mut ws, json!({"type": "dance"})).await;
        assert_eq!(recv(&mut ws).await["type"], "error");

        send(&mut ws, json!({"type": "answer", "option_index": 7})).await;
        assert_eq!(recv(&mut ws).await["type"], "error");

        send(&mut ws, json!({"type": "answer", "option_index": 0})).await;
        assert_eq!(recv(&mut ws).await["entry"]["is_bot"], false);
    })
    .await
    .expect("test timed out");
}
