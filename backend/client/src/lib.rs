//! Client side of the Quarry indexing service.
//!
//! Only the OCR endpoint is needed for annotations; everything else the
//! service offers (upload, search, albums) stays behind its HTTP API.

pub mod ocr;

pub use ocr::{fetch_ocr_or_empty, image_src, HttpOcrSource, OcrSource};
