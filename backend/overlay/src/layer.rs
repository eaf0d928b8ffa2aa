//! The annotation layer drawn over a detail image.

use serde::Serialize;

use quarry_core::{HighlightState, OcrBlock, RenderGeometry, RenderedRect};

use crate::geometry::map_blocks;
use crate::highlight::HighlightMatcher;

/// Border to draw for a highlight state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxStyle {
    pub border_px: u8,
    pub color: &'static str,
}

impl BoxStyle {
    pub fn for_state(state: HighlightState) -> Self {
        match state {
            HighlightState::EntityMatch => Self { border_px: 2, color: "rgba(59,130,246,0.9)" },
            HighlightState::TextMatch => Self { border_px: 2, color: "rgba(34,197,94,0.9)" },
            HighlightState::None => Self { border_px: 1, color: "rgba(255,0,0,0.6)" },
        }
    }

    /// CSS `border` shorthand.
    pub fn css(&self) -> String {
        format!("{}px solid {}", self.border_px, self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedBox {
    pub index: usize,
    pub rect: RenderedRect,
    pub state: HighlightState,
    pub style: BoxStyle,
    /// Hover text: block text and rounded confidence.
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLayer {
    pub width: f64,
    pub height: f64,
    /// The layer never takes pointer input; clicks go to the image below.
    pub pointer_inert: bool,
    pub boxes: Vec<AnnotatedBox>,
}

impl AnnotationLayer {
    pub fn build(blocks: &[OcrBlock], geometry: &RenderGeometry, matcher: &HighlightMatcher) -> Self {
        let rects = map_blocks(blocks, geometry);
        let boxes = blocks
            .iter()
            .zip(rects)
            .enumerate()
            .map(|(index, (block, rect))| {
                let state = matcher.state_for(index, &block.text);
                AnnotatedBox {
                    index,
                    rect,
                    state,
                    style: BoxStyle::for_state(state),
                    tooltip: tooltip(block),
                }
            })
            .collect();

        Self {
            width: geometry.render_width(),
            height: geometry.render_height(),
            pointer_inert: true,
            boxes,
        }
    }

    pub fn count(&self, state: HighlightState) -> usize {
        self.boxes.iter().filter(|b| b.state == state).count()
    }
}

/// `text (confidence)`, confidence rounded half away from zero.
fn tooltip(block: &OcrBlock) -> String {
    format!("{} ({})", block.text, block.confidence.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{BBox, EntityBlockIndex};

    #[test]
    fn builds_one_box_per_block() {
        let geometry = RenderGeometry::new(1000.0, 1000.0, 500.0, 250.0).unwrap();
        let blocks = vec![
            OcrBlock::new("Flight BA117", 94.6, BBox::new(100.0, 200.0, 50.0, 50.0)),
            OcrBlock::new("Gate 22", 71.2, BBox::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let mut idx = EntityBlockIndex::new();
        idx.insert("code", vec![1]);
        let matcher = HighlightMatcher::new("flight", Some("code"), &idx);

        let layer = AnnotationLayer::build(&blocks, &geometry, &matcher);

        assert!(layer.pointer_inert);
        assert_eq!((layer.width, layer.height), (500.0, 250.0));
        assert_eq!(layer.boxes[0].rect, RenderedRect { x: 50.0, y: 50.0, w: 25.0, h: 12.5 });
        assert_eq!(layer.boxes[0].state, HighlightState::TextMatch);
        assert_eq!(layer.boxes[0].tooltip, "Flight BA117 (95)");
        assert_eq!(layer.boxes[1].state, HighlightState::EntityMatch);
        assert_eq!(layer.boxes[1].style.css(), "2px solid rgba(59,130,246,0.9)");
    }

    #[test]
    fn tooltip_confidence_rounds_half_up() {
        let block = |conf| OcrBlock::new("x", conf, BBox::default());
        assert_eq!(tooltip(&block(72.5)), "x (73)");
        assert_eq!(tooltip(&block(96.5)), "x (97)");
        assert_eq!(tooltip(&block(71.2)), "x (71)");
        assert_eq!(tooltip(&block(100.0)), "x (100)");
    }

    #[test]
    fn unmatched_boxes_get_thin_outline() {
        assert_eq!(BoxStyle::for_state(HighlightState::None).css(), "1px solid rgba(255,0,0,0.6)");
        assert_eq!(BoxStyle::for_state(HighlightState::TextMatch).border_px, 2);
    }
}
