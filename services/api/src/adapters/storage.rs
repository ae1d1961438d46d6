//! services/api/src/adapters/storage.rs
//!
//! This module contains the adapter for the hosted object storage service.
//! It implements the `FileStorage` port from the `core` crate over plain HTTP.

use async_trait::async_trait;
use bytes::Bytes;
use parallax_core::ports::{FileStorage, PortError, PortResult};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `FileStorage` port against a storage REST API.
#[derive(Clone)]
pub struct HttpStorageAdapter {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: SecretString,
}

impl HttpStorageAdapter {
    /// Creates a new `HttpStorageAdapter`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        service_key: SecretString,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            service_key,
        }
    }

    fn object_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, object_name
        )
    }

    /// The URL under which an uploaded object is served without credentials.
    pub fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object_name
        )
    }
}

/// Error body returned by the storage API.
#[derive(Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

//=========================================================================================
// `FileStorage` Trait Implementation
//=========================================================================================

#[async_trait]
impl FileStorage for HttpStorageAdapter {
    /// Uploads without overwriting; an existing object with the same name is an error.
    async fn upload(
        &self,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> PortResult<String> {
        let key = self.service_key.expose_secret();
        let response = self
            .client
            .post(self.object_url(object_name))
            .bearer_auth(key)
            .header("apikey", key)
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StorageErrorBody>(&text)
                .ok()
                .and_then(|body| body.message.or(body.error))
                .unwrap_or_else(|| format!("Upload rejected with status {}", status));
            error!("Storage rejected {}: {} ({})", object_name, message, status);
            return Err(PortError::Rejected(message));
        }

        info!("Stored object {} in bucket {}", object_name, self.bucket);
        Ok(self.public_url(object_name))
    }
}
