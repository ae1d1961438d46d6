//! crates/parallax_core/src/domain.rs
//!
//! Defines the core data structures shared by the registration pipeline and
//! the storage ports. Persistence details live in the service adapters.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The payment screenshot attached to a registration form.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the attachment in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A validated registration, ready to be inserted once the attachment URL is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub registration_number: String,
    pub transaction_id: String,
    pub payment_proof_url: String,
    pub accept_terms: bool,
}

/// A registration row as stored by the row store.
///
/// Created once per successful submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub id: Uuid,
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub registration_number: String,
    pub transaction_id: String,
    pub payment_proof_url: String,
    pub accept_terms: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A speaker on the event roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub name: &'static str,
    pub topic: &'static str,
    pub featured: bool,
}

/// One canned question/answer pair offered next to the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerFaq {
    pub question: &'static str,
    pub answer: &'static str,
}
