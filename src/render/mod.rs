// Wed Jan 21 2026 - Alex

pub mod error;
pub mod grid;
pub mod label;
pub mod stats;

pub use error::RenderError;
pub use grid::{GridModel, GridRenderer, GridRow, Segment, SegmentKind};
pub use label::{field_label, FieldLabel, LabelPolicy, BASE_ROW_HEIGHT, BIT_LABEL_STEP};
pub use stats::{LayoutStats, LOW_EFFICIENCY_THRESHOLD};

use crate::structure::StructLayout;

/// Renders with the default renderer (adaptive labels, no tail padding).
pub fn render(layout: &StructLayout, visual_scale: f64) -> Result<GridModel, RenderError> {
    GridRenderer::new().render(layout, visual_scale)
}
