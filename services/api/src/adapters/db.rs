//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `RegistrationStore` port from the `core` crate. It writes registrations
//! to the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parallax_core::domain::{NewRegistration, RegistrationRecord};
use parallax_core::ports::{PortError, PortResult, RegistrationStore};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `RegistrationStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct RegistrationRow {
    id: Uuid,
    full_name: String,
    mobile: String,
    email: String,
    registration_number: String,
    transaction_id: String,
    payment_proof_url: String,
    accept_terms: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl RegistrationRow {
    fn to_domain(self) -> RegistrationRecord {
        RegistrationRecord {
            id: self.id,
            full_name: self.full_name,
            mobile: self.mobile,
            email: self.email,
            registration_number: self.registration_number,
            transaction_id: self.transaction_id,
            payment_proof_url: self.payment_proof_url,
            accept_terms: self.accept_terms,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const INSERT_REGISTRATION: &str = "INSERT INTO registrations \
    (full_name, mobile, email, registration_number, transaction_id, payment_proof_url, accept_terms) \
    VALUES ($1, $2, $3, $4, $5, $6, $7) \
    RETURNING id, full_name, mobile, email, registration_number, transaction_id, \
    payment_proof_url, accept_terms, created_at, updated_at";

//=========================================================================================
// `RegistrationStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl RegistrationStore for DbAdapter {
    async fn insert(&self, registration: NewRegistration) -> PortResult<RegistrationRecord> {
        let record = sqlx::query_as::<_, RegistrationRow>(INSERT_REGISTRATION)
            .bind(registration.full_name)
            .bind(registration.mobile)
            .bind(registration.email)
            .bind(registration.registration_number)
            .bind(registration.transaction_id)
            .bind(registration.payment_proof_url)
            .bind(registration.accept_terms)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                // Constraint violations and the like carry a message worth showing.
                sqlx::Error::Database(db_err) => PortError::Rejected(db_err.message().to_string()),
                other => PortError::Unexpected(other.to_string()),
            })?;
        Ok(record.to_domain())
    }
}
