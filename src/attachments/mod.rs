mod http_object_store;

pub use http_object_store::HttpObjectStore;

use crate::domain::Attachment;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `bucket/key` and return a public URL for them.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, anyhow::Error>;
}

/// Where a stored attachment lives. Only [`AttachmentHandler`] hands these
/// out, so holding one means the upload succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRef {
    key: String,
    url: String,
}

impl StorageRef {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(thiserror::Error)]
#[error("Failed to store attachment '{key}'.")]
pub struct UploadError {
    pub key: String,
    #[source]
    source: anyhow::Error,
}

impl std::fmt::Debug for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::routes::error_chain_fmt(self, f)
    }
}

pub struct AttachmentHandler {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl AttachmentHandler {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: String) -> Self {
        Self { store, bucket }
    }

    #[tracing::instrument(
        name = "Store submission attachment",
        skip(self, attachment),
        fields(bucket = %self.bucket, size = attachment.bytes().len())
    )]
    pub async fn store(&self, attachment: Attachment) -> Result<StorageRef, UploadError> {
        let key = storage_key(
            Utc::now().timestamp_millis(),
            &mut rand::thread_rng(),
            attachment.extension(),
        );
        let content_type = attachment.kind().content_type();
        match self
            .store
            .put(&self.bucket, &key, attachment.into_bytes(), content_type)
            .await
        {
            Ok(url) => {
                tracing::info!(key = %key, "Attachment stored");
                Ok(StorageRef { key, url })
            }
            Err(source) => Err(UploadError { key, source }),
        }
    }
}

const TOKEN_LENGTH: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `{epoch-millis}-{base36 token}.{extension}`
pub fn storage_key<R: Rng + ?Sized>(epoch_millis: i64, rng: &mut R, extension: &str) -> String {
    let token: String = std::iter::repeat_with(|| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .take(TOKEN_LENGTH)
        .collect();
    format!("{}-{}.{}", epoch_millis, token, extension)
}
