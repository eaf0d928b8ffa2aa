use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use quarry_core::{OcrPayload, QuarryError};

/// Anything that can supply OCR blocks for an image.
#[async_trait]
pub trait OcrSource: Send + Sync {
    async fn fetch_ocr(&self, image_id: &str) -> Result<OcrPayload>;
}

/// `GET {base}/image/{id}/ocr` against the indexing service.
pub struct HttpOcrSource {
    client: Client,
    base_url: String,
}

impl HttpOcrSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: trim_base(base_url.into()),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn ocr_url(&self, image_id: &str) -> String {
        format!("{}/image/{}/ocr", self.base_url, image_id)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl OcrSource for HttpOcrSource {
    async fn fetch_ocr(&self, image_id: &str) -> Result<OcrPayload> {
        let url = self.ocr_url(image_id);
        debug!(image_id = %image_id, url = %url, "Fetching OCR blocks");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(image_id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(fetch_error(image_id, format!("endpoint returned {status}: {error_body}")).into());
        }

        let body = response.text().await.context("Failed to read OCR response body")?;
        let payload = OcrPayload::from_json(&body)?;
        debug!(image_id = %image_id, blocks = payload.blocks.len(), "OCR blocks received");
        Ok(payload)
    }
}

fn fetch_error(image_id: &str, message: String) -> QuarryError {
    QuarryError::Fetch {
        image_id: image_id.to_string(),
        message,
    }
}

/// Fetch OCR, degrading any failure to an empty payload so the detail
/// view stays usable without annotations.
pub async fn fetch_ocr_or_empty(source: &dyn OcrSource, image_id: &str) -> OcrPayload {
    match source.fetch_ocr(image_id).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!(image_id = %image_id, error = %e, "OCR unavailable; showing image without overlay");
            OcrPayload::default()
        }
    }
}

/// URL of the full-size image for a detail view.
pub fn image_src(base_url: &str, image_id: &str) -> String {
    format!("{}/images/{}.jpg", base_url.trim_end_matches('/'), image_id)
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
