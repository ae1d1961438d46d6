//! services/api/src/web/state.rs
//!
//! Defines the application's shared and connection-specific states.

use chrono::Utc;
use parallax_core::dialogue::DialogueSession;
use parallax_core::registration::RegistrationPipeline;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: RegistrationPipeline,
    /// Pause before each scripted dialogue reply.
    pub reply_delay: Duration,
}

//=========================================================================================
// SessionState (Specific to One WebSocket Connection)
//=========================================================================================

/// The dialogue state for a single, open WebSocket connection.
///
/// Nothing here outlives the connection; reconnecting starts a fresh dialogue.
pub struct SessionState {
    pub dialogue: DialogueSession,
    /// Set while a bot turn is still being delivered. New answers are refused meanwhile.
    pub reply_pending: bool,
    /// A token to cancel the in-flight reply task.
    pub cancellation_token: CancellationToken,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            dialogue: DialogueSession::new(Utc::now()),
            reply_pending: false,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Cancels any pending reply and restarts the dialogue from the greeting.
    pub fn reset(&mut self) {
        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();
        self.reply_pending = false;
        self.dialogue.reset(Utc::now());
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
