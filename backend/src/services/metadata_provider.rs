use crate::error::{CatalogError, Result};
use crate::models::{Video, VideoEnvelope};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use url::form_urlencoded::byte_serialize;

/// Source of canonical video records.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_video(&self, video_id: &str) -> Result<Video>;
}

/// Fetches video details over HTTP from a URL template containing `{video_id}`.
pub struct HttpMetadataProvider {
    client: Client,
    url_template: String,
}

impl HttpMetadataProvider {
    pub fn new(url_template: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url_template: url_template.to_string(),
        })
    }

    pub fn video_url(&self, video_id: &str) -> String {
        let encoded: String = byte_serialize(video_id.as_bytes()).collect();
        self.url_template.replace("{video_id}", &encoded)
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataProvider {
    async fn fetch_video(&self, video_id: &str) -> Result<Video> {
        let url = self.video_url(video_id);
        debug!("Fetching metadata for video {video_id}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Metadata provider returned {status} for video {video_id}");
            return Err(CatalogError::Upstream(format!(
                "provider returned {status} for video {video_id}"
            )));
        }

        let body = response.text().await?;
        decode_envelope(&body)
    }
}

/// Unwraps the provider's `{status, data, message}` envelope.
pub fn decode_envelope(body: &str) -> Result<Video> {
    let envelope: VideoEnvelope = serde_json::from_str(body)
        .map_err(|e| CatalogError::Upstream(format!("malformed provider response: {e}")))?;

    if !envelope.status {
        let message = match envelope.message {
            serde_json::Value::String(message) => message,
            serde_json::Value::Null => "no message".to_string(),
            other => other.to_string(),
        };
        return Err(CatalogError::Upstream(format!(
            "provider reported failure: {message}"
        )));
    }

    envelope
        .data
        .ok_or_else(|| CatalogError::Upstream("provider response carried no data".to_string()))
}
