//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a dialogue WebSocket connection.
//! It owns the connection's dialogue session and hands bot replies to the reply task.

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    reply_task::{reply_process, send_message, WsSender},
    state::{AppState, SessionState},
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use chrono::Utc;
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New dialogue connection established.");

    // The sender is wrapped in an Arc<Mutex<>> to allow for shared mutable access across tasks.
    let (sender, mut receiver) = socket.split();
    let ws_sender: WsSender = Arc::new(Mutex::new(sender));
    let session_state_lock = Arc::new(Mutex::new(SessionState::new()));

    // --- 1. Initial Sync ---
    let (transcript, options) = {
        let session = session_state_lock.lock().await;
        (
            ServerMessage::transcript(&session.dialogue),
            ServerMessage::options(&session.dialogue),
        )
    };
    for message in [transcript, options] {
        if let Err(e) = send_message(&ws_sender, &message).await {
            error!("Failed to send initial dialogue state: {}", e);
            return;
        }
    }

    // --- 2. Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                handle_text_message(text.as_str(), &app_state, &session_state_lock, &ws_sender)
                    .await;
            }
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- 3. Cleanup ---
    session_state_lock.lock().await.cancellation_token.cancel();
    info!("Dialogue connection closed.");
}

/// Helper function to handle the logic for different `ClientMessage` variants.
async fn handle_text_message(
    text: &str,
    app_state: &Arc<AppState>,
    session_state_lock: &Arc<Mutex<SessionState>>,
    ws_sender: &WsSender,
) {
    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(client_msg) => client_msg,
        Err(e) => {
            warn!("Failed to deserialize client message: {}", e);
            reply_error(ws_sender, format!("Unrecognized message: {}", e)).await;
            return;
        }
    };

    match client_msg {
        ClientMessage::Answer { option_index } => {
            let mut session = session_state_lock.lock().await;
            if session.reply_pending {
                drop(session);
                reply_error(ws_sender, "Please wait for the current reply.".to_string()).await;
                return;
            }
            let turn = match session.dialogue.answer(option_index, Utc::now()) {
                Ok(turn) => turn,
                Err(e) => {
                    drop(session);
                    warn!("Rejected answer: {}", e);
                    reply_error(ws_sender, e.to_string()).await;
                    return;
                }
            };
            info!(
                "Answer {} recorded; next question {:?}",
                option_index,
                turn.next_question.map(|id| id.to_string())
            );
            session.reply_pending = true;
            let token = session.cancellation_token.clone();
            let user_entry = ServerMessage::last_entry(&session.dialogue);
            drop(session);

            if let Some(entry) = user_entry {
                if let Err(e) = send_message(ws_sender, &entry).await {
                    error!("Failed to echo answer: {}", e);
                }
            }

            let session_state_lock = session_state_lock.clone();
            let ws_sender = ws_sender.clone();
            let delay = app_state.reply_delay;
            tokio::spawn(async move {
                if let Err(e) = reply_process(session_state_lock, ws_sender, turn, delay, token).await {
                    error!("Reply process failed: {}", e);
                }
            });
        }
        ClientMessage::AskFaq { index } => {
            let mut session = session_state_lock.lock().await;
            if session.reply_pending {
                drop(session);
                reply_error(ws_sender, "Please wait for the current reply.".to_string()).await;
                return;
            }
            let asked = session.dialogue.ask_faq(index, Utc::now()).map(|_| {
                let entries = session.dialogue.transcript();
                entries[entries.len() - 2..].to_vec()
            });
            drop(session);
            match asked {
                Ok(entries) => {
                    for entry in entries {
                        if let Err(e) = send_message(ws_sender, &ServerMessage::Entry { entry }).await {
                            error!("Failed to send speaker answer: {}", e);
                            return;
                        }
                    }
                }
                Err(e) => reply_error(ws_sender, e.to_string()).await,
            }
        }
        ClientMessage::Reset => {
            info!("Reset message received. Restarting dialogue.");
            let (transcript, options) = {
                let mut session = session_state_lock.lock().await;
                session.reset();
                (
                    ServerMessage::transcript(&session.dialogue),
                    ServerMessage::options(&session.dialogue),
                )
            };
            for message in [transcript, options] {
                if let Err(e) = send_message(ws_sender, &message).await {
                    error!("Failed to send reset dialogue state: {}", e);
                    return;
                }
            }
        }
    }
}

async fn reply_error(ws_sender: &WsSender, message: String) {
    if let Err(e) = send_message(ws_sender, &ServerMessage::Error { message }).await {
        error!("Failed to send error message: {}", e);
    }
}
