//! Projection of OCR boxes from bitmap pixels onto the rendered image.

use quarry_core::{BBox, OcrBlock, RenderGeometry, RenderedRect};

/// Supplies the current rendered geometry of the displayed image.
///
/// Whatever draws the image (a browser, a terminal preview, a test) reports
/// the natural and rendered sizes; `None` means it has not been laid out yet.
pub trait GeometryProvider {
    fn current(&self) -> Option<RenderGeometry>;
}

/// A fixed geometry, e.g. measured once by the caller.
#[derive(Debug, Clone, Copy)]
pub struct StaticGeometry(pub RenderGeometry);

impl GeometryProvider for StaticGeometry {
    fn current(&self) -> Option<RenderGeometry> {
        Some(self.0)
    }
}

pub fn map_bbox(bbox: &BBox, geometry: &RenderGeometry) -> RenderedRect {
    let (sx, sy) = (geometry.scale_x(), geometry.scale_y());
    RenderedRect {
        x: bbox.x * sx,
        y: bbox.y * sy,
        w: bbox.w * sx,
        h: bbox.h * sy,
    }
}

/// One rendered rectangle per block, in block order.
pub fn map_blocks(blocks: &[OcrBlock], geometry: &RenderGeometry) -> Vec<RenderedRect> {
    blocks.iter().map(|b| map_bbox(&b.bbox, geometry)).collect()
}
