// src/services/uploads.rs
//
// Image-host upload client. Avatars and loan images are pushed here first;
// only the returned hosted URL is ever sent to the backend.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::common::{AppConfig, ClientError};

#[derive(Debug, Clone)]
pub struct UploadService {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
}

impl UploadService {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            endpoint: config.image_host_url.clone(),
            api_key: config.image_host_key.clone(),
        }
    }

    /// Uploads raw image bytes as a multipart form, returning the hosted URL.
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ClientError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("image", part);
        debug!(filename, "Uploading image");
        self.send(form).await
    }

    /// Uploads image bytes as a base64 form field (the host accepts both).
    pub async fn upload_base64(&self, bytes: &[u8]) -> Result<String, ClientError> {
        let form = Form::new().text("image", BASE64.encode(bytes));
        self.send(form).await
    }

    async fn send(&self, form: Form) -> Result<String, ClientError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ClientError::Upload("image host key not configured".into()))?;
        let url = format!("{}?key={}", self.endpoint, urlencoding::encode(key));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Upload(format!("HTTP {}: {}", status, body)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        info!(url = %uploaded.data.url, "Image uploaded");
        Ok(uploaded.data.url)
    }
}
