pub mod entities;
pub mod error;
pub mod geometry;
pub mod ocr;

pub use entities::{EntityBlockIndex, ExtractedEntities};
pub use error::QuarryError;
pub use geometry::{HighlightState, RenderGeometry, RenderedRect};
pub use ocr::{BBox, OcrBlock, OcrPayload};
