//! OCR overlay for the image detail view.
//!
//! Maps server-supplied OCR boxes onto the rendered image, decides which
//! boxes to highlight, and keeps the detail view's state consistent while
//! OCR responses arrive asynchronously.

pub mod chips;
pub mod detail;
pub mod geometry;
pub mod highlight;
pub mod layer;
pub mod session;

pub use chips::{entity_chips, EntityChip};
pub use detail::{DetailEvent, DetailOutcome, DetailView, FetchTicket};
pub use geometry::{map_bbox, map_blocks, GeometryProvider, StaticGeometry};
pub use highlight::{classify, ActiveEntity, HighlightMatcher};
pub use layer::{AnnotatedBox, AnnotationLayer, BoxStyle};
pub use session::{DetailSession, LayerUpdate};
