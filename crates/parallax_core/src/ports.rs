//! crates/parallax_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the hosted object storage and row store it talks to.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{NewRegistration, RegistrationRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The collaborator answered, but refused the request.
    #[error("{0}")]
    Rejected(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `bytes` under `object_name` and returns a publicly resolvable URL.
    async fn upload(
        &self,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> PortResult<String>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Inserts one registration. The store assigns id and timestamps.
    async fn insert(&self, registration: NewRegistration) -> PortResult<RegistrationRecord>;
}
