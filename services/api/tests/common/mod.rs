//! Shared helpers for the API integration tests: in-memory ports and a
//! server on a random port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_lib::web::{self, AppState};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use parallax_core::domain::{NewRegistration, RegistrationRecord};
use parallax_core::ports::{FileStorage, PortError, PortResult, RegistrationStore};
use parallax_core::registration::RegistrationPipeline;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Maximum time any test is allowed to run before we consider it hung.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Records uploads; answers with a CDN-style URL or a fixed rejection.
#[derive(Default)]
pub struct MemoryStorage {
    pub uploads: Mutex<Vec<(String, usize, String)>>,
    pub reject_with: Option<&'static str>,
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn upload(
        &self,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> PortResult<String> {
        self.uploads.lock().unwrap().push((
            object_name.to_string(),
            bytes.len(),
            content_type.to_string(),
        ));
        match self.reject_with {
            Some(message) => Err(PortError::Rejected(message.to_string())),
            None => Ok(format!("https://cdn.test/payment-proofs/{object_name}")),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub rows: Mutex<Vec<RegistrationRecord>>,
    pub reject_with: Option<&'static str>,
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, registration: NewRegistration) -> PortResult<RegistrationRecord> {
        if let Some(message) = self.reject_with {
            return Err(PortError::Rejected(message.to_string()));
        }
        let now = Utc::now();
        let record = RegistrationRecord {
            id: Uuid::new_v4(),
            full_name: registration.full_name,
            mobile: registration.mobile,
            email: registration.email,
            registration_number: registration.registration_number,
            transaction_id: registration.transaction_id,
            payment_proof_url: registration.payment_proof_url,
            accept_terms: registration.accept_terms,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// Start the API router on a random port and return the port.
pub async fn start_server(
    storage: Arc<MemoryStorage>,
    store: Arc<MemoryStore>,
    reply_delay: Duration,
) -> u16 {
    let app_state = Arc::new(AppState {
        pipeline: RegistrationPipeline::new(storage, store),
        reply_delay,
    });
    let app = web::router(app_state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}
