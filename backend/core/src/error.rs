use thiserror::Error;

/// Top-level error type for the Quarry client.
#[derive(Debug, Error)]
pub enum QuarryError {
    #[error("invalid render geometry: {0}")]
    InvalidGeometry(String),

    #[error("OCR fetch failed for image {image_id}: {message}")]
    Fetch { image_id: String, message: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}
