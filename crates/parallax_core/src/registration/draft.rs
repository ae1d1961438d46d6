//! Client-side form state around the pipeline.
//!
//! A `RegistrationDraft` owns what the user typed plus the field errors being
//! shown. Success clears both; any failure keeps the form so nothing has to
//! be retyped.

use serde::Serialize;

use super::form::{Field, RegistrationForm};
use super::pipeline::{RegistrationPipeline, SubmissionError};
use super::validate::ValidationErrors;
use crate::domain::{Attachment, RegistrationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Success,
    Destructive,
}

/// A toast shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn registered() -> Self {
        Self {
            title: "Registration Successful!".to_string(),
            description: "Your registration has been submitted successfully. You will receive a confirmation email shortly.".to_string(),
            variant: NoticeVariant::Success,
        }
    }

    pub fn invalid() -> Self {
        Self {
            title: "Validation Error".to_string(),
            description: "Please fill in all required fields correctly.".to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// A failure notice carrying the collaborator's message when there is one.
    pub fn failed(message: &str) -> Self {
        let description = if message.trim().is_empty() {
            "An error occurred during registration. Please try again.".to_string()
        } else {
            message.to_string()
        };
        Self {
            title: "Registration Failed".to_string(),
            description,
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn for_error(error: &SubmissionError) -> Self {
        match error {
            SubmissionError::Validation(_) => Self::invalid(),
            other => Self::failed(&other.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RegistrationDraft {
    form: RegistrationForm,
    errors: ValidationErrors,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Sets a text field and clears its error. Returns `false` for the
    /// attachment and terms fields, which have their own setters.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> bool {
        let slot = match field {
            Field::FullName => &mut self.form.full_name,
            Field::Mobile => &mut self.form.mobile,
            Field::Email => &mut self.form.email,
            Field::RegistrationNumber => &mut self.form.registration_number,
            Field::TransactionId => &mut self.form.transaction_id,
            Field::PaymentProof | Field::AcceptTerms => return false,
        };
        *slot = value.into();
        self.errors.clear(field);
        true
    }

    pub fn set_accept_terms(&mut self, accepted: bool) {
        self.form.accept_terms = accepted;
        self.errors.clear(Field::AcceptTerms);
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.form.payment_proof = Some(attachment);
        self.errors.clear(Field::PaymentProof);
    }

    /// Runs the pipeline against the current form and applies the outcome.
    pub async fn submit(
        &mut self,
        pipeline: &RegistrationPipeline,
    ) -> (Notice, Option<RegistrationRecord>) {
        let outcome = pipeline.submit(&self.form).await;
        match outcome {
            Ok(record) => {
                self.form = RegistrationForm::default();
                self.errors = ValidationErrors::default();
                (Notice::registered(), Some(record))
            }
            Err(SubmissionError::Validation(errors)) => {
                self.errors = errors;
                (Notice::invalid(), None)
            }
            Err(other) => (Notice::for_error(&other), None),
        }
    }
}
