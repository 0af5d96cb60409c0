use crate::attachments::ObjectStore;
use crate::configuration::ObjectStorageSettings;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, Secret};

/// Storage REST API client (`/storage/v1/object/...`).
pub struct HttpObjectStore {
    http_client: reqwest::Client,
    base_url: String,
    service_key: Secret<String>,
}

impl HttpObjectStore {
    pub fn new(settings: &ObjectStorageSettings) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build the object storage HTTP client.")?;
        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            service_key: settings.service_key.clone(),
        })
    }

    fn upload_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, key)
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    #[tracing::instrument(name = "Upload object", skip(self, bytes), fields(size = bytes.len()))]
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, anyhow::Error> {
        self.http_client
            .post(self.upload_url(bucket, key))
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.service_key.expose_secret()),
            )
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .context("Failed to reach object storage.")?
            .error_for_status()
            .context("Object storage rejected the upload.")?;
        Ok(self.public_url(bucket, key))
    }
}
