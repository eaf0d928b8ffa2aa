use serde::{Deserialize, Serialize};

use crate::entities::EntityBlockIndex;
use crate::error::QuarryError;

/// Axis-aligned box in source-bitmap pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// A single recognized text fragment. Its position in the block list is
/// its identity for entity index lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrBlock {
    #[serde(default)]
    pub text: String,
    /// Recognizer confidence, 0–100 (−1 when the engine reported none).
    #[serde(default, rename = "conf", alias = "confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub bbox: BBox,
}

impl OcrBlock {
    pub fn new(text: impl Into<String>, confidence: f64, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox,
        }
    }
}

/// Body of `GET /image/{id}/ocr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrPayload {
    #[serde(default)]
    pub blocks: Vec<OcrBlock>,
    #[serde(default)]
    pub entity_block_idxs: EntityBlockIndex,
}

impl OcrPayload {
    /// Parse a raw response body.
    pub fn from_json(body: &str) -> Result<Self, QuarryError> {
        serde_json::from_str(body).map_err(|e| QuarryError::MalformedPayload(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_shape() {
        let body = r#"{
            "blocks": [
                {"text": "Invoice", "conf": 96.0, "bbox": {"x": 10, "y": 20, "w": 80, "h": 14}},
                {"text": "a@b.com", "conf": 91.5, "bbox": {"x": 10, "y": 40, "w": 60, "h": 14}}
            ],
            "entity_block_idxs": {"email": [1]}
        }"#;
        let payload = OcrPayload::from_json(body).unwrap();
        assert_eq!(payload.blocks.len(), 2);
        assert_eq!(payload.blocks[0].confidence, 96.0);
        assert_eq!(payload.blocks[1].bbox, BBox::new(10.0, 40.0, 60.0, 14.0));
        assert!(payload.entity_block_idxs.indices_for("email").contains(&1));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let payload = OcrPayload::from_json("{}").unwrap();
        assert!(payload.is_empty());
        assert!(payload.entity_block_idxs.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = OcrPayload::from_json(r#"{"error": "ocr not found", "blocks": 3}"#).unwrap_err();
        assert!(matches!(err, QuarryError::MalformedPayload(_)));
    }
}
