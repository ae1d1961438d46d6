//! The transient registration form and the names of its fields.

use serde::Serialize;
use std::fmt;

use crate::domain::Attachment;

/// Form contents as typed by the user, held until submit.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub registration_number: String,
    pub transaction_id: String,
    pub payment_proof: Option<Attachment>,
    pub accept_terms: bool,
}

impl RegistrationForm {
    /// True when every text field is empty, no file is attached and terms are unchecked.
    pub fn is_blank(&self) -> bool {
        self.full_name.is_empty()
            && self.mobile.is_empty()
            && self.email.is_empty()
            && self.registration_number.is_empty()
            && self.transaction_id.is_empty()
            && self.payment_proof.is_none()
            && !self.accept_terms
    }
}

/// A form field, used as the key of field-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Mobile,
    Email,
    RegistrationNumber,
    TransactionId,
    PaymentProof,
    AcceptTerms,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FullName,
        Field::Mobile,
        Field::Email,
        Field::RegistrationNumber,
        Field::TransactionId,
        Field::PaymentProof,
        Field::AcceptTerms,
    ];

    /// The multipart/form name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Mobile => "mobile",
            Field::Email => "email",
            Field::RegistrationNumber => "registration_number",
            Field::TransactionId => "transaction_id",
            Field::PaymentProof => "payment_proof",
            Field::AcceptTerms => "accept_terms",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
