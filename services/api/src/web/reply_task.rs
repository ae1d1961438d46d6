//! services/api/src/web/reply_task.rs
//!
//! This module contains the asynchronous "worker" function that delivers one
//! scripted bot turn with conversational pacing.

use crate::error::ApiError;
use crate::web::{protocol::ServerMessage, state::SessionState};
use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use futures::{stream::SplitSink, SinkExt};
use parallax_core::dialogue::BotTurn;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub type WsSender = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// Serializes a message and writes it to the socket.
pub async fn send_message(ws_sender: &WsSender, message: &ServerMessage) -> Result<(), ApiError> {
    let json = serde_json::to_string(message)?;
    ws_sender.lock().await.send(Message::Text(json.into())).await?;
    Ok(())
}

/// Delivers `turn`: the remark after `delay`, then the next prompt after another
/// `delay`, then the fresh option list.
///
/// The task is cancelled via the session's `CancellationToken` when the user
/// resets the dialogue or disconnects; a cancelled task leaves the session alone
/// and sends nothing further.
pub async fn reply_process(
    session_state_lock: Arc<Mutex<SessionState>>,
    ws_sender: WsSender,
    turn: BotTurn,
    delay: Duration,
    cancellation_token: CancellationToken,
) -> Result<(), ApiError> {
    let mut lines = vec![turn.remark.clone()];
    lines.extend(turn.next_prompt().map(str::to_string));

    for line in lines {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                info!("Reply cancelled before delivery.");
                return Ok(());
            }
            _ = tokio::time::sleep(delay) => {}
        }

        // Held through the send: after a reset nothing from this turn reaches the socket.
        let mut session = session_state_lock.lock().await;
        if cancellation_token.is_cancelled() {
            return Ok(());
        }
        session.dialogue.push_bot(&line, Utc::now());
        if let Some(entry) = ServerMessage::last_entry(&session.dialogue) {
            send_message(&ws_sender, &entry).await?;
        }
    }

    let mut session = session_state_lock.lock().await;
    if cancellation_token.is_cancelled() {
        return Ok(());
    }
    session.reply_pending = false;
    send_message(&ws_sender, &ServerMessage::options(&session.dialogue)).await
}
