// Fri Jan 23 2026 - Alex

use crate::render::{GridModel, GridRow, LabelPolicy, Segment};
use crate::structure::FieldKind;
use colored::{ColoredString, Colorize};

/// Presentation units covered by one character cell.
pub const UNITS_PER_CELL: f64 = 10.0;

const PAD_LABEL: &str = "PAD";

/// Draws a [`GridModel`] as boxes of characters, one box per row.
///
/// Column positions come from the model's derived x/width metrics, so the
/// same model rescaled draws wider or narrower boxes with identical content.
#[derive(Debug, Clone)]
pub struct TextGrid {
    use_color: bool,
    show_offsets: bool,
}

struct Cell<'a> {
    segment: &'a Segment,
    width: usize,
}

impl TextGrid {
    pub fn new() -> Self {
        Self {
            use_color: true,
            show_offsets: true,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_offsets(mut self, show_offsets: bool) -> Self {
        self.show_offsets = show_offsets;
        self
    }

    pub fn render(&self, model: &GridModel) -> String {
        let mut lines = self.header(model);
        lines.push(String::new());

        if model.rows.is_empty() {
            lines.push("(empty struct)".to_string());
        }

        for row in &model.rows {
            lines.extend(self.row_lines(model, row));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn header(&self, model: &GridModel) -> Vec<String> {
        let stats = &model.stats;
        let mut lines = Vec::new();

        if let Some(name) = &model.name {
            lines.push(self.paint(name.clone(), |s| s.cyan().bold()));
        }

        let efficiency = format!("Eff: {:.1}%", stats.efficiency_percent);
        let efficiency = if stats.low_efficiency {
            self.paint(efficiency, |s| s.red().bold())
        } else {
            self.paint(efficiency, |s| s.green())
        };
        lines.push(format!(
            "Size: {} B | Data: {} B | Pad: {} B | {}",
            stats.total_size, stats.data_bytes, stats.padding_bytes, efficiency
        ));

        let mode = match model.pack_value {
            Some(pack) => format!("Packed: {} B", pack),
            None => format!("Natural (max align {} B)", model.max_align),
        };
        lines.push(self.paint(mode, |s| s.dimmed()));
        lines
    }

    fn row_lines(&self, model: &GridModel, row: &GridRow) -> Vec<String> {
        let cells = Self::cells(model, row);
        let text_lines = 1 + Self::bit_lines(model, row);
        let prefix = if self.show_offsets {
            format!("0x{:04x} ", row.start_byte)
        } else {
            String::new()
        };
        let blank = " ".repeat(prefix.len());

        let border = {
            let mut line = blank.clone();
            for cell in &cells {
                line.push('+');
                line.push_str(&"-".repeat(cell.width.saturating_sub(1)));
            }
            line.push('+');
            line
        };

        let mut lines = vec![border.clone()];
        for idx in 0..text_lines {
            let mut line = if idx == 0 { prefix.clone() } else { blank.clone() };
            for cell in &cells {
                let inner = cell.width.saturating_sub(1);
                let text = self.cell_text(model, cell.segment, idx, inner);
                line.push('|');
                line.push_str(&self.color_cell(model, cell.segment, fit(&text, inner)));
            }
            line.push('|');
            lines.push(line);
        }
        lines.push(border);
        lines
    }

    /// Extra label lines a row needs below the field names.
    fn bit_lines(model: &GridModel, row: &GridRow) -> usize {
        let has_bits = row
            .segments
            .iter()
            .filter_map(|s| model.label(s))
            .any(|label| !label.bit_labels.is_empty());
        match (has_bits, model.label_policy) {
            (false, _) => 0,
            (true, LabelPolicy::Fixed) => 1,
            (true, LabelPolicy::Adaptive) => row.label_lines,
        }
    }

    fn cells<'a>(model: &GridModel, row: &'a GridRow) -> Vec<Cell<'a>> {
        let mut cells = Vec::with_capacity(row.segments.len());
        let mut cursor = 0usize;
        for segment in &row.segments {
            let x = model.segment_x(row, segment);
            let left = to_column(x).max(cursor);
            let right = to_column(x + model.segment_width(segment)).max(left + 1);
            cells.push(Cell {
                segment,
                width: right - left,
            });
            cursor = right;
        }
        cells
    }

    fn cell_text(&self, model: &GridModel, segment: &Segment, line: usize, inner: usize) -> String {
        let Some(label) = model.label(segment) else {
            return if line == 0 && inner >= PAD_LABEL.len() {
                PAD_LABEL.to_string()
            } else {
                String::new()
            };
        };

        if line == 0 {
            return label.text.clone();
        }
        if label.bit_labels.is_empty() {
            return String::new();
        }
        match model.label_policy {
            LabelPolicy::Fixed => label.bit_summary(),
            LabelPolicy::Adaptive => label.bit_labels.get(line - 1).cloned().unwrap_or_default(),
        }
    }

    fn color_cell(&self, model: &GridModel, segment: &Segment, text: String) -> String {
        match model.label(segment).map(|label| label.kind) {
            None => self.paint(text, |s| s.red()),
            Some(FieldKind::FunctionPointer) => self.paint(text, |s| s.magenta()),
            Some(FieldKind::Pointer) => self.paint(text, |s| s.blue()),
            Some(_) => self.paint(text, |s| s.green()),
        }
    }

    fn paint(&self, text: String, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_color {
            style(&text).to_string()
        } else {
            text
        }
    }
}

impl Default for TextGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn to_column(units: f64) -> usize {
    (units / UNITS_PER_CELL).round().max(0.0) as usize
}

/// Pads or cuts `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.push_str(&" ".repeat(width - len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GridRenderer;
    use crate::structure::StructureBuilder;

    fn plain() -> TextGrid {
        TextGrid::new().with_color(false)
    }

    #[test]
    fn test_padding_layout() {
        let layout = StructureBuilder::new(8, 4).name("Pair").scalar("a", 0, 1).scalar("b", 4, 4).build();
        let model = GridRenderer::new().render(&layout, 80.0).unwrap();
        let text = plain().render(&model);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Pair");
        assert_eq!(lines[1], "Size: 8 B | Data: 5 B | Pad: 3 B | Eff: 62.5%");
        assert_eq!(lines[2], "Natural (max align 4 B)");
        assert_eq!(lines[4], "       +-------+-----------------------+");
        assert_eq!(lines[5], "0x0000 |a      |PAD                    |");
        assert_eq!(lines[8], "0x0004 |b                              |");
    }

    #[test]
    fn test_packed_header() {
        let layout = StructureBuilder::new(8, 4).pack(4).scalar("a", 0, 4).scalar("b", 4, 4).build();
        let model = GridRenderer::new().render(&layout, 40.0).unwrap();
        let text = plain().render(&model);
        assert!(text.contains("Packed: 4 B"));
        assert!(text.contains("Eff: 100.0%"));
    }

    #[test]
    fn test_scale_widens_cells() {
        let layout = StructureBuilder::new(4, 4).scalar("a", 0, 4).build();
        let renderer = GridRenderer::new();
        let narrow = plain().with_offsets(false).render(&renderer.render(&layout, 20.0).unwrap());
        let wide = plain().with_offsets(false).render(&renderer.render(&layout, 40.0).unwrap());
        assert!(narrow.contains("+-------+\n"));
        assert!(wide.contains("+---------------+\n"));
    }

    #[test]
    fn test_tiny_scale_keeps_every_segment() {
        let layout = StructureBuilder::new(4, 4).scalar("a", 0, 1).scalar("b", 1, 1).scalar("c", 2, 2).build();
        let model = GridRenderer::new().render(&layout, 1.0).unwrap();
        let text = plain().with_offsets(false).render(&model);
        let row = text.lines().find(|l| l.starts_with('|')).unwrap();
        assert_eq!(row.matches('|').count(), 4);
    }

    #[test]
    fn test_bit_labels_by_policy() {
        let layout = StructureBuilder::new(4, 4)
            .bit_run("lo, hi", 0, 4, &[("lo", 4), ("hi", 12)])
            .build();

        let adaptive = GridRenderer::new().render(&layout, 60.0).unwrap();
        let text = plain().with_offsets(false).render(&adaptive);
        assert!(text.contains("|lo:4b "));
        assert!(text.contains("|hi:12b "));

        let fixed = GridRenderer::new()
            .with_label_policy(LabelPolicy::Fixed)
            .render(&layout, 60.0)
            .unwrap();
        let text = plain().with_offsets(false).render(&fixed);
        assert!(text.contains("|lo:4b | hi:12b "));
    }

    #[test]
    fn test_empty_model() {
        let model = GridRenderer::new().render(&StructureBuilder::new(0, 1).build(), 10.0).unwrap();
        assert!(plain().render(&model).contains("(empty struct)"));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("x", 0), "");
    }
}
