pub mod protocol;
pub mod reply_task;
pub mod rest;
pub mod state;
pub mod ws_handler;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

// Re-export the main WebSocket handler to make it easily accessible
// to the binary that will build the web server router.
pub use rest::ApiDoc;
pub use state::AppState;
pub use ws_handler::ws_handler;

/// Room above the 5 MiB attachment limit so oversize files still reach validation.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the API router. CORS and Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/registrations", post(rest::register_handler))
        .route("/speakers", get(rest::list_speakers_handler))
        .route("/speakers/faq", get(rest::speaker_faq_handler))
        .route("/quiz", get(rest::quiz_questions_handler))
        .route("/quiz/match", post(rest::quiz_match_handler))
        .route("/dialogue/ws", get(ws_handler))
        .route("/health", get(rest::health_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}
