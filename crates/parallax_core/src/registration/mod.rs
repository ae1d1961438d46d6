//! Event registration: form state, validation and the upload-then-insert pipeline.

pub mod draft;
pub mod form;
pub mod object_name;
pub mod pipeline;
pub mod validate;

pub use draft::{Notice, NoticeVariant, RegistrationDraft};
pub use form::{Field, RegistrationForm};
pub use object_name::object_name;
pub use pipeline::{RegistrationPipeline, SubmissionError};
pub use validate::{
    validate, FieldError, ValidRegistration, ValidationErrorKind, ValidationErrors,
    MAX_PAYMENT_PROOF_BYTES,
};
