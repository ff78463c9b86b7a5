//! Client for the image-hosting collaborator (Cloudinary-style
//! unsigned upload).
//!
//! This is the only call the service makes to a non-owned upstream,
//! so transient failures (transport errors, 5xx) are retried with
//! exponential backoff before the caller's create is aborted. 4xx
//! responses are terminal: retrying a rejected preset or a malformed
//! file cannot succeed.

use std::time::Duration;

use serde::Deserialize;

use crate::config::ImageHostConfig;

/// Delay before the first retry.
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Upper bound on the delay between attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Total attempts per upload (first try plus retries).
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image host rejected the upload: {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("image host returned a malformed response")]
    MalformedResponse,
}

/// Successful upload response; `secure_url` is the hosted URL.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Unsigned-upload client for a single image-hosting account.
pub struct ImageHost {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

impl ImageHost {
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                config.cloud_name
            ),
            upload_preset: config.upload_preset.clone(),
        }
    }

    /// Upload one image and return its hosted URL.
    ///
    /// Retries transport errors and 5xx responses up to
    /// [`MAX_ATTEMPTS`] with doubling delays; 4xx is returned
    /// immediately.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let mut delay = INITIAL_RETRY_DELAY;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self
                .try_upload(file_name, content_type, bytes.clone())
                .await
            {
                Ok(url) => {
                    tracing::info!(file_name, attempt, "Image uploaded");
                    return Ok(url);
                }
                Err(err) if attempt < MAX_ATTEMPTS && is_retryable(&err) => {
                    tracing::warn!(
                        file_name,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Image upload failed, retrying",
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(UploadError::Transport)?;
        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { status, body });
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|_| UploadError::MalformedResponse)?;
        Ok(parsed.secure_url)
    }
}

fn is_retryable(err: &UploadError) -> bool {
    match err {
        UploadError::Transport(_) => true,
        UploadError::Rejected { status, .. } => status.is_server_error(),
        UploadError::MalformedResponse => false,
    }
}
