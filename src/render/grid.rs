// Wed Jan 21 2026 - Alex

use crate::render::{FieldLabel, LabelPolicy, LayoutStats, RenderError};
use crate::structure::{StructLayout, StructureValidator};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Padding,
    Field,
}

/// A byte range inside one row. `field` indexes into the layout's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
    pub field: Option<usize>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_padding(&self) -> bool {
        self.kind == SegmentKind::Padding
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub start_byte: usize,
    pub end_byte: usize,
    pub label_lines: usize,
    pub segments: Vec<Segment>,
}

impl GridRow {
    pub fn width(&self) -> usize {
        self.end_byte - self.start_byte
    }

    pub fn covered_bytes(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }
}

/// Output of one render call.
///
/// `rows` and `stats` depend only on the layout and label policy. Everything
/// measured in presentation units is derived from `visual_scale` on demand, so
/// two models rendered at different scales compare equal row for row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridModel {
    pub name: Option<String>,
    pub rows: Vec<GridRow>,
    pub stats: LayoutStats,
    pub labels: Vec<FieldLabel>,
    pub row_width: usize,
    pub visual_scale: f64,
    pub label_policy: LabelPolicy,
    pub pack_value: Option<usize>,
    pub max_align: usize,
}

impl GridModel {
    pub fn segment_x(&self, row: &GridRow, segment: &Segment) -> f64 {
        (segment.start - row.start_byte) as f64 * self.visual_scale
    }

    pub fn segment_width(&self, segment: &Segment) -> f64 {
        segment.len() as f64 * self.visual_scale
    }

    pub fn row_extent(&self, row: &GridRow) -> f64 {
        row.width() as f64 * self.visual_scale
    }

    pub fn row_height(&self, row: &GridRow) -> f64 {
        self.label_policy.row_height(row.label_lines)
    }

    pub fn label(&self, segment: &Segment) -> Option<&FieldLabel> {
        segment.field.and_then(|idx| self.labels.get(idx))
    }

    /// Same grid at another scale.
    pub fn rescaled(&self, visual_scale: f64) -> Result<Self, RenderError> {
        check_scale(visual_scale)?;
        Ok(Self {
            visual_scale,
            ..self.clone()
        })
    }
}

fn check_scale(visual_scale: f64) -> Result<(), RenderError> {
    if visual_scale.is_finite() && visual_scale > 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidScale(visual_scale))
    }
}

fn clip(start: usize, end: usize, row_start: usize, row_end: usize) -> Option<(usize, usize)> {
    let lo = start.max(row_start);
    let hi = end.min(row_end);
    (hi > lo).then_some((lo, hi))
}

/// Cuts a validated layout into rows of `pack_value` (or `max_align`) bytes.
pub struct GridRenderer {
    label_policy: LabelPolicy,
    tail_padding: bool,
    validator: StructureValidator,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self {
            label_policy: LabelPolicy::default(),
            tail_padding: false,
            validator: StructureValidator::new(),
        }
    }

    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    /// Whether the gap after the last field is drawn as padding. Off by
    /// default, so only `padding_before` gaps and fields become segments.
    pub fn with_tail_padding(mut self, enabled: bool) -> Self {
        self.tail_padding = enabled;
        self
    }

    pub fn label_policy(&self) -> LabelPolicy {
        self.label_policy
    }

    /// Validates the layout and cuts it into rows. Segments come from each
    /// field's `padding_before` and its byte range; the bytes after the last
    /// field are drawn only when [`with_tail_padding`](Self::with_tail_padding)
    /// is on.
    pub fn render(&self, layout: &StructLayout, visual_scale: f64) -> Result<GridModel, RenderError> {
        check_scale(visual_scale)?;
        self.validator.validate(layout)?;

        let row_width = layout.row_width();
        let total_size = layout.total_size();

        let mut rows = Vec::new();
        let mut byte_offset = 0;
        while byte_offset < total_size {
            let end = (byte_offset + row_width).min(total_size);
            rows.push(self.build_row(layout, byte_offset, end));
            byte_offset += row_width;
        }

        log::debug!(
            "Rendered {} rows of {} bytes for {}",
            rows.len(),
            row_width,
            layout.name().unwrap_or("<anonymous>")
        );

        Ok(GridModel {
            name: layout.name().map(str::to_string),
            rows,
            stats: LayoutStats::compute(layout),
            labels: layout.fields().iter().map(FieldLabel::for_field).collect(),
            row_width,
            visual_scale,
            label_policy: self.label_policy,
            pack_value: layout.pack_value(),
            max_align: layout.max_align(),
        })
    }

    fn build_row(&self, layout: &StructLayout, start: usize, end: usize) -> GridRow {
        let fields = layout.fields();
        let mut segments = Vec::new();

        for field in fields {
            if let Some((lo, hi)) = clip(field.padding_start(), field.offset(), start, end) {
                segments.push(Segment {
                    kind: SegmentKind::Padding,
                    start: lo,
                    end: hi,
                    field: None,
                });
            }
        }

        if self.tail_padding {
            let data_end = fields.iter().map(|f| f.end()).max().unwrap_or(0);
            if let Some((lo, hi)) = clip(data_end, layout.total_size(), start, end) {
                segments.push(Segment {
                    kind: SegmentKind::Padding,
                    start: lo,
                    end: hi,
                    field: None,
                });
            }
        }

        let mut max_bit_fields = 0;
        for (idx, field) in fields.iter().enumerate() {
            if let Some((lo, hi)) = clip(field.offset(), field.end(), start, end) {
                max_bit_fields = max_bit_fields.max(field.bit_fields().len());
                segments.push(Segment {
                    kind: SegmentKind::Field,
                    start: lo,
                    end: hi,
                    field: Some(idx),
                });
            }
        }

        // stable, so padding stays ahead of a field starting at the same byte
        segments.sort_by_key(|s| s.start);

        GridRow {
            start_byte: start,
            end_byte: end,
            label_lines: self.label_policy.label_lines(max_bit_fields),
            segments,
        }
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new()
    }
}
