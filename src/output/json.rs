// Fri Jan 23 2026 - Alex

use crate::render::{GridModel, GridRow};
use serde_json::{json, to_string, to_string_pretty, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes a [`GridModel`] as JSON, with the scale-derived metrics spelled out
/// next to the byte ranges they come from.
pub struct GridJsonSerializer {
    pretty_print: bool,
    include_metrics: bool,
}

impl GridJsonSerializer {
    pub fn new() -> Self {
        Self {
            pretty_print: true,
            include_metrics: true,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Whether rows and segments carry `x`/`width`/`height` in presentation units.
    pub fn with_metrics(mut self, include: bool) -> Self {
        self.include_metrics = include;
        self
    }

    pub fn serialize(&self, model: &GridModel) -> Result<String, JsonError> {
        let value = self.build_json_value(model)?;
        let text = if self.pretty_print {
            to_string_pretty(&value)?
        } else {
            to_string(&value)?
        };
        Ok(text)
    }

    pub fn serialize_to_file<P: AsRef<Path>>(&self, model: &GridModel, path: P) -> Result<(), JsonError> {
        let text = self.serialize(model)?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn build_json_value(&self, model: &GridModel) -> Result<Value, JsonError> {
        let mut root = serde_json::to_value(model)?;

        if self.include_metrics {
            let rows: Vec<Value> = model.rows.iter().map(|row| self.serialize_row(model, row)).collect();
            if let Some(obj) = root.as_object_mut() {
                obj.insert("rows".to_string(), Value::Array(rows));
            }
        }

        Ok(root)
    }

    fn serialize_row(&self, model: &GridModel, row: &GridRow) -> Value {
        let segments: Vec<Value> = row
            .segments
            .iter()
            .map(|segment| {
                json!({
                    "kind": segment.kind,
                    "start": segment.start,
                    "end": segment.end,
                    "field": segment.field,
                    "x": model.segment_x(row, segment),
                    "width": model.segment_width(segment),
                })
            })
            .collect();

        json!({
            "start_byte": row.start_byte,
            "end_byte": row.end_byte,
            "label_lines": row.label_lines,
            "width": model.row_extent(row),
            "height": model.row_height(row),
            "segments": segments,
        })
    }
}

impl Default for GridJsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GridRenderer;
    use crate::structure::StructureBuilder;

    #[test]
    fn test_metrics_follow_scale() {
        let layout = StructureBuilder::new(8, 4).name("Pair").scalar("a", 0, 1).scalar("b", 4, 4).build();
        let model = GridRenderer::new().render(&layout, 20.0).unwrap();
        let value = GridJsonSerializer::new().build_json_value(&model).unwrap();

        assert_eq!(value["name"], "Pair");
        assert_eq!(value["stats"]["efficiency_percent"], 62.5);
        assert_eq!(value["label_policy"], "adaptive");
        let pad = &value["rows"][0]["segments"][1];
        assert_eq!(pad["kind"], "padding");
        assert_eq!(pad["x"], 20.0);
        assert_eq!(pad["width"], 60.0);
        assert_eq!(value["rows"][0]["height"], 50.0);
        assert_eq!(value["labels"][1]["text"], "b");
    }

    #[test]
    fn test_without_metrics() {
        let layout = StructureBuilder::new(4, 4).scalar("a", 0, 4).build();
        let model = GridRenderer::new().render(&layout, 20.0).unwrap();
        let text = GridJsonSerializer::new()
            .with_pretty_print(false)
            .with_metrics(false)
            .serialize(&model)
            .unwrap();
        assert!(text.starts_with('{'));
        assert!(!text.contains("\"height\""));
        assert!(text.contains("\"segments\""));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let layout = StructureBuilder::new(4, 4).scalar("a", 0, 4).build();
        let model = GridRenderer::new().render(&layout, 20.0).unwrap();
        GridJsonSerializer::new().serialize_to_file(&model, &path).unwrap();
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["row_width"], 4);
    }
}
