//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use parallax_core::catalog::{SPEAKERS, SPEAKER_FAQ};
use parallax_core::domain::{Attachment, RegistrationRecord, Speaker, SpeakerFaq};
use parallax_core::quiz::{DomainMatch, DomainQuiz, QUIZ_QUESTIONS};
use parallax_core::registration::{
    Field, Notice, RegistrationForm, SubmissionError, ValidationErrors,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        register_handler,
        list_speakers_handler,
        speaker_faq_handler,
        quiz_questions_handler,
        quiz_match_handler,
        health_handler,
    ),
    components(
        schemas(
            RegisteredResponse,
            InvalidRegistrationResponse,
            FailedRegistrationResponse,
            QuizQuestionResponse,
            QuizMatchRequest,
            QuizSelection,
            QuizErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Parallax API", description = "Event registration, speaker catalog and speaker matching.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Sent after a registration has been stored.
#[derive(Serialize, ToSchema)]
pub struct RegisteredResponse {
    #[schema(value_type = Object)]
    record: RegistrationRecord,
    #[schema(value_type = Object)]
    notice: Notice,
}

/// Sent when the form has field errors. Nothing was uploaded or stored.
#[derive(Serialize, ToSchema)]
pub struct InvalidRegistrationResponse {
    /// Field name → `{kind, message}`.
    #[schema(value_type = Object)]
    errors: ValidationErrors,
    #[schema(value_type = Object)]
    notice: Notice,
}

/// Sent when the upload or the insert failed.
#[derive(Serialize, ToSchema)]
pub struct FailedRegistrationResponse {
    /// `upload` or `persist`.
    stage: &'static str,
    #[schema(value_type = Object)]
    notice: Notice,
}

#[derive(Serialize, ToSchema)]
pub struct QuizQuestionResponse {
    id: &'static str,
    prompt: &'static str,
    weight: f64,
    options: Vec<&'static str>,
}

#[derive(Deserialize, ToSchema)]
pub struct QuizSelection {
    question_id: String,
    option: String,
}

#[derive(Deserialize, ToSchema)]
pub struct QuizMatchRequest {
    selections: Vec<QuizSelection>,
}

#[derive(Serialize, ToSchema)]
pub struct QuizErrorResponse {
    message: String,
    missing: Vec<&'static str>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
}

//=========================================================================================
// Registration
//=========================================================================================

/// Submit an event registration.
///
/// Accepts a multipart/form-data request with one part per form field. The
/// payment screenshot goes in the `payment_proof` file part.
#[utoipa::path(
    post,
    path = "/registrations",
    request_body(content_type = "multipart/form-data", description = "The registration form."),
    responses(
        (status = 201, description = "Registration stored", body = RegisteredResponse),
        (status = 400, description = "Malformed multipart body"),
        (status = 422, description = "Field errors", body = InvalidRegistrationResponse),
        (status = 502, description = "Upload or insert failed", body = FailedRegistrationResponse)
    )
)]
pub async fn register_handler(
    State(app_state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let form = read_form(multipart).await.map_err(|e| {
        warn!("Rejected registration body: {}", e);
        (e.status(), format!("Failed to read multipart data: {}", e))
    })?;

    match app_state.pipeline.submit(&form).await {
        Ok(record) => {
            let response = RegisteredResponse {
                record,
                notice: Notice::registered(),
            };
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
        Err(SubmissionError::Validation(errors)) => {
            warn!("Registration failed validation on {} field(s)", errors.len());
            let response = InvalidRegistrationResponse {
                errors,
                notice: Notice::invalid(),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response())
        }
        Err(e) => {
            error!("Registration failed at {}: {}", e.stage(), e);
            let response = FailedRegistrationResponse {
                stage: e.stage(),
                notice: Notice::for_error(&e),
            };
            Ok((StatusCode::BAD_GATEWAY, Json(response)).into_response())
        }
    }
}

/// Collects the multipart parts into a form. Unknown parts are skipped; an
/// empty file part counts as no file.
async fn read_form(mut multipart: Multipart) -> Result<RegistrationForm, MultipartError> {
    let mut form = RegistrationForm::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().and_then(Field::from_name) else {
            continue;
        };
        match name {
            Field::PaymentProof => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.payment_proof = (!file_name.is_empty() && !bytes.is_empty())
                    .then(|| Attachment::new(file_name, content_type, bytes));
            }
            Field::AcceptTerms => {
                let value = field.text().await?;
                form.accept_terms = is_checked(&value);
            }
            text_field => {
                let value = field.text().await?;
                let slot = match text_field {
                    Field::FullName => &mut form.full_name,
                    Field::Mobile => &mut form.mobile,
                    Field::Email => &mut form.email,
                    Field::RegistrationNumber => &mut form.registration_number,
                    Field::TransactionId => &mut form.transaction_id,
                    Field::PaymentProof | Field::AcceptTerms => continue,
                };
                *slot = value;
            }
        }
    }
    Ok(form)
}

fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

//=========================================================================================
// Speakers
//=========================================================================================

/// List the speaker roster.
#[utoipa::path(
    get,
    path = "/speakers",
    responses((status = 200, description = "All speakers"))
)]
pub async fn list_speakers_handler() -> Json<&'static [Speaker]> {
    Json(&SPEAKERS[..])
}

/// The canned speaker questions offered next to the dialogue.
#[utoipa::path(
    get,
    path = "/speakers/faq",
    responses((status = 200, description = "Question/answer pairs"))
)]
pub async fn speaker_faq_handler() -> Json<&'static [SpeakerFaq]> {
    Json(&SPEAKER_FAQ[..])
}

//=========================================================================================
// Quiz
//=========================================================================================

/// The weighted quiz questions and their options.
#[utoipa::path(
    get,
    path = "/quiz",
    responses((status = 200, description = "Quiz questions", body = Vec<QuizQuestionResponse>))
)]
pub async fn quiz_questions_handler() -> Json<Vec<QuizQuestionResponse>> {
    let questions = QUIZ_QUESTIONS
        .iter()
        .map(|q| QuizQuestionResponse {
            id: q.id,
            prompt: q.prompt,
            weight: q.weight(),
            options: q.options.to_vec(),
        })
        .collect();
    Json(questions)
}

/// Score a completed quiz.
#[utoipa::path(
    post,
    path = "/quiz/match",
    request_body = QuizMatchRequest,
    responses(
        (status = 200, description = "Winning domain and per-domain percentages"),
        (status = 422, description = "Unknown or missing answers", body = QuizErrorResponse)
    )
)]
pub async fn quiz_match_handler(
    Json(request): Json<QuizMatchRequest>,
) -> Result<Json<DomainMatch>, (StatusCode, Json<QuizErrorResponse>)> {
    let mut quiz = DomainQuiz::new();
    let rejected = |message: String, missing: Vec<&'static str>| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(QuizErrorResponse { message, missing }),
        )
    };

    for selection in &request.selections {
        quiz.select(&selection.question_id, &selection.option)
            .map_err(|e| rejected(e.to_string(), Vec::new()))?;
    }
    let domain_match = quiz
        .resolve()
        .map_err(|e| rejected(e.to_string(), quiz.missing()))?;

    info!("Quiz resolved to {}", domain_match.top_domain.as_str());
    Ok(Json(domain_match))
}

//=========================================================================================
// Health
//=========================================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_values() {
        for value in ["true", "on", "1", "yes", " TRUE "] {
            assert!(is_checked(value), "{value}");
        }
        for value in ["", "false", "off", "0", "no"] {
            assert!(!is_checked(value), "{value}");
        }
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/registrations",
            "/speakers",
            "/speakers/faq",
            "/quiz",
            "/quiz/match",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
