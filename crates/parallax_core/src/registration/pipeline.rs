//! The registration submission pipeline: validate, upload, persist.
//!
//! The two remote calls run strictly in sequence because the stored record
//! needs the attachment URL. Nothing is retried; the first failure aborts
//! the attempt.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::form::RegistrationForm;
use super::object_name::object_name;
use super::validate::{validate, ValidationErrors};
use crate::domain::{NewRegistration, RegistrationRecord};
use crate::ports::{FileStorage, PortError, RegistrationStore};

/// Why a submit attempt did not produce a record.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    Upload(PortError),
    /// The attachment at `object_name` was uploaded and is left in storage.
    #[error("{source}")]
    Persist {
        object_name: String,
        #[source]
        source: PortError,
    },
}

impl SubmissionError {
    /// The stage that failed, as reported to clients.
    pub fn stage(&self) -> &'static str {
        match self {
            SubmissionError::Validation(_) => "validation",
            SubmissionError::Upload(_) => "upload",
            SubmissionError::Persist { .. } => "persist",
        }
    }
}

#[derive(Clone)]
pub struct RegistrationPipeline {
    storage: Arc<dyn FileStorage>,
    store: Arc<dyn RegistrationStore>,
}

impl RegistrationPipeline {
    pub fn new(storage: Arc<dyn FileStorage>, store: Arc<dyn RegistrationStore>) -> Self {
        Self { storage, store }
    }

    /// Validates the form, uploads the payment proof, then inserts the record.
    pub async fn submit(
        &self,
        form: &RegistrationForm,
    ) -> Result<RegistrationRecord, SubmissionError> {
        let valid = validate(form).map_err(SubmissionError::Validation)?;

        let attachment = valid.payment_proof;
        let name = object_name(
            Utc::now(),
            &mut rand::thread_rng(),
            &attachment.file_name,
            &attachment.content_type,
        );

        info!("Uploading payment proof as {} ({} bytes)", name, attachment.len());
        let payment_proof_url = self
            .storage
            .upload(&name, attachment.bytes.clone(), &attachment.content_type)
            .await
            .map_err(|e| {
                error!("Payment proof upload failed: {}", e);
                SubmissionError::Upload(e)
            })?;

        let registration = NewRegistration {
            full_name: valid.full_name,
            mobile: valid.mobile,
            email: valid.email,
            registration_number: valid.registration_number,
            transaction_id: valid.transaction_id,
            payment_proof_url,
            accept_terms: true,
        };

        match self.store.insert(registration).await {
            Ok(record) => {
                info!("Registration {} stored", record.id);
                Ok(record)
            }
            Err(e) => {
                warn!(
                    object_name = %name,
                    "Registration insert failed; uploaded payment proof is orphaned: {}",
                    e
                );
                Err(SubmissionError::Persist {
                    object_name: name,
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Attachment;
    use crate::ports::PortResult;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Records every upload and answers with a fixed URL or a fixed failure.
    #[derive(Default)]
    pub struct FakeStorage {
        pub uploads: Mutex<Vec<(String, usize, String)>>,
        pub fail_with: Option<&'static str>,
    }

    #[async_trait]
    impl FileStorage for FakeStorage {
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
            match self.fail_with {
                Some(message) => Err(PortError::Rejected(message.to_string())),
                None => Ok(format!("https://cdn.test/payment-proofs/{object_name}")),
            }
        }
    }

    #[derive(Default)]
    pub struct FakeStore {
        pub inserted: Mutex<Vec<NewRegistration>>,
        pub fail_with: Option<&'static str>,
    }

    #[async_trait]
    impl RegistrationStore for FakeStore {
        async fn insert(&self, registration: NewRegistration) -> PortResult<RegistrationRecord> {
            if let Some(message) = self.fail_with {
                return Err(PortError::Unexpected(message.to_string()));
            }
            self.inserted.lock().unwrap().push(registration.clone());
            let now = Utc::now();
            Ok(RegistrationRecord {
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
            })
        }
    }

    pub fn valid_form() -> RegistrationForm {
        RegistrationForm {
            full_name: " Rohan Mehta ".to_string(),
            mobile: "9123456780".to_string(),
            email: "rohan@example.in".to_string(),
            registration_number: "229301120".to_string(),
            transaction_id: "UPI-5521".to_string(),
            payment_proof: Some(Attachment::new("pay.png", "image/png", vec![1u8; 2048])),
            accept_terms: true,
        }
    }

    fn pipeline(storage: &Arc<FakeStorage>, store: &Arc<FakeStore>) -> RegistrationPipeline {
        RegistrationPipeline::new(storage.clone(), store.clone())
    }

    #[tokio::test]
    async fn stored_record_carries_the_uploaded_url() {
        let storage = Arc::new(FakeStorage::default());
        let store = Arc::new(FakeStore::default());

        let record = pipeline(&storage, &store).submit(&valid_form()).await.unwrap();

        let uploads = storage.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        let (name, size, content_type) = &uploads[0];
        assert!(name.ends_with(".png"));
        assert_eq!((*size, content_type.as_str()), (2048, "image/png"));
        assert_eq!(
            record.payment_proof_url,
            format!("https://cdn.test/payment-proofs/{name}")
        );
        assert_eq!(record.full_name, "Rohan Mehta");
        assert_eq!(store.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let storage = Arc::new(FakeStorage::default());
        let store = Arc::new(FakeStore::default());
        let mut form = valid_form();
        form.email = "a@b".to_string();

        let err = pipeline(&storage, &store).submit(&form).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Validation(ref e) if e.len() == 1));
        assert!(storage.uploads.lock().unwrap().is_empty());
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_skips_persist() {
        let storage = Arc::new(FakeStorage {
            fail_with: Some("bucket not found"),
            ..Default::default()
        });
        let store = Arc::new(FakeStore::default());

        let err = pipeline(&storage, &store).submit(&valid_form()).await.unwrap_err();

        assert_eq!(err.stage(), "upload");
        assert_eq!(err.to_string(), "bucket not found");
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn persist_failure_reports_the_orphaned_object() {
        let storage = Arc::new(FakeStorage::default());
        let store = Arc::new(FakeStore {
            fail_with: Some("duplicate key"),
            ..Default::default()
        });

        let err = pipeline(&storage, &store).submit(&valid_form()).await.unwrap_err();

        let uploaded = storage.uploads.lock().unwrap()[0].0.clone();
        match err {
            SubmissionError::Persist { object_name, source } => {
                assert_eq!(object_name, uploaded);
                assert!(source.to_string().contains("duplicate key"));
            }
            other => panic!("expected persist failure, got {other:?}"),
        }
    }
}
