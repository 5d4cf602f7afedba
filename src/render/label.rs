// Wed Jan 21 2026 - Alex

use crate::structure::{FieldKind, LayoutField};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Height of a row holding a single label line, in presentation units.
pub const BASE_ROW_HEIGHT: f64 = 50.0;
/// Extra height per additional stacked bit-field label.
pub const BIT_LABEL_STEP: f64 = 14.0;

/// How rows make room for bit-field labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Every row is one label line tall; bit-fields share a single line.
    Fixed,
    /// Rows grow to stack one line per bit-field of the widest field they hold.
    #[default]
    Adaptive,
}

impl LabelPolicy {
    pub fn label_lines(&self, max_bit_fields: usize) -> usize {
        match self {
            Self::Fixed => 1,
            Self::Adaptive => max_bit_fields.max(1),
        }
    }

    pub fn row_height(&self, label_lines: usize) -> f64 {
        BASE_ROW_HEIGHT + label_lines.saturating_sub(1) as f64 * BIT_LABEL_STEP
    }
}

impl FromStr for LabelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(format!("Unknown label policy: {}", other)),
        }
    }
}

impl fmt::Display for LabelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Adaptive => write!(f, "adaptive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLabel {
    pub text: String,
    pub kind: FieldKind,
    pub bit_labels: Vec<String>,
}

impl FieldLabel {
    pub fn for_field(field: &LayoutField) -> Self {
        Self {
            text: field_label(field),
            kind: field.kind(),
            bit_labels: field.bit_fields().iter().map(ToString::to_string).collect(),
        }
    }

    /// All bit-field labels on one line, as the fixed policy shows them.
    pub fn bit_summary(&self) -> String {
        self.bit_labels.iter().join(" | ")
    }
}

/// `name_fn` for function pointers, `name*` for other pointers, plus `[count]` for arrays.
pub fn field_label(field: &LayoutField) -> String {
    let mut label = field.name().to_string();
    if field.is_function_pointer() {
        label.push_str("_fn");
    } else if field.is_pointer() {
        label.push('*');
    }
    if field.is_array() && field.count() > 1 {
        label.push_str(&format!("[{}]", field.count()));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::BitField;

    #[test]
    fn test_labels() {
        assert_eq!(field_label(&LayoutField::new("a", 0, 4)), "a");
        assert_eq!(field_label(&LayoutField::new("p", 0, 4).with_pointer(true)), "p*");
        assert_eq!(
            field_label(&LayoutField::new("cb", 0, 4).with_type_name("function_ptr")),
            "cb_fn"
        );
        assert_eq!(field_label(&LayoutField::new("buf", 0, 8).with_count(8)), "buf[8]");
        assert_eq!(
            field_label(&LayoutField::new("ptrs", 0, 16).with_pointer(true).with_count(4)),
            "ptrs*[4]"
        );
        assert_eq!(
            field_label(&LayoutField::new("handlers", 0, 16).with_type_name("function_ptr").with_count(4)),
            "handlers_fn[4]"
        );
    }

    #[test]
    fn test_single_element_array_has_no_suffix() {
        let field = LayoutField::new("one", 0, 4).with_array(true, 1);
        assert_eq!(field_label(&field), "one");
    }

    #[test]
    fn test_bit_labels() {
        let field = LayoutField::new("flags", 0, 1)
            .with_bit_fields(vec![BitField::new("enable", 1), BitField::new("mode", 3)]);
        let label = FieldLabel::for_field(&field);
        assert_eq!(label.kind, FieldKind::Scalar);
        assert_eq!(label.bit_labels, vec!["enable:1b", "mode:3b"]);
        assert_eq!(label.bit_summary(), "enable:1b | mode:3b");
    }

    #[test]
    fn test_policy_heights() {
        assert_eq!(LabelPolicy::Fixed.label_lines(4), 1);
        assert_eq!(LabelPolicy::Adaptive.label_lines(4), 4);
        assert_eq!(LabelPolicy::Adaptive.label_lines(0), 1);
        assert_eq!(LabelPolicy::Adaptive.row_height(1), 50.0);
        assert_eq!(LabelPolicy::Adaptive.row_height(4), 92.0);
        assert_eq!("FIXED".parse::<LabelPolicy>(), Ok(LabelPolicy::Fixed));
        assert!("tall".parse::<LabelPolicy>().is_err());
    }
}
