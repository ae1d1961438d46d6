//! Field-level validation of a registration form.
//!
//! Every predicate runs on every submit so the caller can highlight all
//! invalid fields at once.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use super::form::{Field, RegistrationForm};
use crate::domain::Attachment;

/// Largest accepted payment proof, in bytes.
pub const MAX_PAYMENT_PROOF_BYTES: usize = 5 * 1024 * 1024;

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern is valid"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Missing,
    WrongFormat,
    TooLarge,
    WrongType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn new(kind: ValidationErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }
}

/// All field errors of one submit attempt, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(|field| field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A form that passed every predicate. Text fields are trimmed.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub registration_number: String,
    pub transaction_id: String,
    pub payment_proof: Attachment,
}

/// Runs every field predicate and collects all violations.
pub fn validate(form: &RegistrationForm) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        errors.insert(
            Field::FullName,
            FieldError::new(ValidationErrorKind::Missing, "Full name is required"),
        );
    }

    let mobile = form.mobile.trim();
    if let Some(error) = check_mobile(mobile) {
        errors.insert(Field::Mobile, error);
    }

    let email = form.email.trim();
    if let Some(error) = check_email(email) {
        errors.insert(Field::Email, error);
    }

    let registration_number = form.registration_number.trim();
    if registration_number.is_empty() {
        errors.insert(
            Field::RegistrationNumber,
            FieldError::new(
                ValidationErrorKind::Missing,
                "Registration number is required",
            ),
        );
    }

    let transaction_id = form.transaction_id.trim();
    if transaction_id.is_empty() {
        errors.insert(
            Field::TransactionId,
            FieldError::new(ValidationErrorKind::Missing, "Transaction ID is required"),
        );
    }

    if let Some(error) = check_payment_proof(form.payment_proof.as_ref()) {
        errors.insert(Field::PaymentProof, error);
    }

    if !form.accept_terms {
        errors.insert(
            Field::AcceptTerms,
            FieldError::new(
                ValidationErrorKind::Missing,
                "You must accept the terms and conditions",
            ),
        );
    }

    match (&form.payment_proof, errors.is_empty()) {
        (Some(payment_proof), true) => Ok(ValidRegistration {
            full_name: full_name.to_string(),
            mobile: mobile.to_string(),
            email: email.to_string(),
            registration_number: registration_number.to_string(),
            transaction_id: transaction_id.to_string(),
            payment_proof: payment_proof.clone(),
        }),
        _ => Err(errors),
    }
}

fn check_mobile(mobile: &str) -> Option<FieldError> {
    if mobile.is_empty() {
        Some(FieldError::new(
            ValidationErrorKind::Missing,
            "Mobile number is required",
        ))
    } else if !MOBILE_RE.is_match(mobile) {
        Some(FieldError::new(
            ValidationErrorKind::WrongFormat,
            "Please enter a valid 10-digit mobile number",
        ))
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<FieldError> {
    if email.is_empty() {
        Some(FieldError::new(
            ValidationErrorKind::Missing,
            "Email is required",
        ))
    } else if !EMAIL_RE.is_match(email) {
        Some(FieldError::new(
            ValidationErrorKind::WrongFormat,
            "Please enter a valid email address",
        ))
    } else {
        None
    }
}

/// Size is checked before type, so an oversized non-image reports the size.
fn check_payment_proof(attachment: Option<&Attachment>) -> Option<FieldError> {
    let Some(attachment) = attachment else {
        return Some(FieldError::new(
            ValidationErrorKind::Missing,
            "Payment proof is required",
        ));
    };
    if attachment.len() > MAX_PAYMENT_PROOF_BYTES {
        return Some(FieldError::new(
            ValidationErrorKind::TooLarge,
            "File size must be less than 5MB",
        ));
    }
    if !attachment.content_type.starts_with("image/") {
        return Some(FieldError::new(
            ValidationErrorKind::WrongType,
            "Please upload an image file",
        ));
    }
    None
}
