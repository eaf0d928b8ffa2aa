use serde::{Deserialize, Serialize};

use crate::error::QuarryError;

/// Natural bitmap size paired with the size the image is currently drawn at.
///
/// The two axes scale independently; a stretched image keeps distinct
/// `scale_x` and `scale_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderGeometry {
    natural_width: f64,
    natural_height: f64,
    render_width: f64,
    render_height: f64,
}

impl RenderGeometry {
    pub fn new(
        natural_width: f64,
        natural_height: f64,
        render_width: f64,
        render_height: f64,
    ) -> Result<Self, QuarryError> {
        for (name, value) in [
            ("naturalWidth", natural_width),
            ("naturalHeight", natural_height),
            ("renderWidth", render_width),
            ("renderHeight", render_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(QuarryError::InvalidGeometry(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(Self {
            natural_width,
            natural_height,
            render_width,
            render_height,
        })
    }

    pub fn scale_x(&self) -> f64 {
        self.render_width / self.natural_width
    }

    pub fn scale_y(&self) -> f64 {
        self.render_height / self.natural_height
    }

    pub fn render_width(&self) -> f64 {
        self.render_width
    }

    pub fn render_height(&self) -> f64 {
        self.render_height
    }
}

/// A block's rectangle in rendered-display space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Why (or whether) a block is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightState {
    #[default]
    None,
    TextMatch,
    EntityMatch,
}
