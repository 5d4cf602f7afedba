// Mon Jan 19 2026 - Alex

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar,
    Pointer,
    Array,
    FunctionPointer,
}

impl FieldKind {
    /// Type tag used for function pointers in layout JSON.
    pub const FUNCTION_POINTER_TAG: &'static str = "function_ptr";

    pub fn classify(type_name: &str, is_pointer: bool, is_array: bool) -> Self {
        if type_name == Self::FUNCTION_POINTER_TAG {
            Self::FunctionPointer
        } else if is_pointer {
            Self::Pointer
        } else if is_array {
            Self::Array
        } else {
            Self::Scalar
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitField {
    pub name: String,
    pub bits: u32,
}

impl BitField {
    pub fn new(name: impl Into<String>, bits: u32) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}b", self.name, self.bits)
    }
}

/// One laid-out member. Bit-field runs appear as a single storage unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutField {
    name: String,
    type_name: String,
    kind: FieldKind,
    offset: usize,
    size: usize,
    padding_before: usize,
    is_pointer: bool,
    is_array: bool,
    count: usize,
    bit_fields: Vec<BitField>,
}

impl LayoutField {
    pub fn new(name: impl Into<String>, offset: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            type_name: String::new(),
            kind: FieldKind::Scalar,
            offset,
            size,
            padding_before: 0,
            is_pointer: false,
            is_array: false,
            count: 1,
            bit_fields: Vec::new(),
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self.kind = FieldKind::classify(&self.type_name, self.is_pointer, self.is_array);
        self
    }

    pub fn with_padding_before(mut self, padding: usize) -> Self {
        self.padding_before = padding;
        self
    }

    pub fn with_pointer(mut self, is_pointer: bool) -> Self {
        self.is_pointer = is_pointer;
        self.kind = FieldKind::classify(&self.type_name, self.is_pointer, self.is_array);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self.is_array = count > 1;
        self.kind = FieldKind::classify(&self.type_name, self.is_pointer, self.is_array);
        self
    }

    pub fn with_array(mut self, is_array: bool, count: usize) -> Self {
        self.is_array = is_array;
        self.count = count;
        self.kind = FieldKind::classify(&self.type_name, self.is_pointer, self.is_array);
        self
    }

    pub fn with_bit_fields(mut self, bit_fields: Vec<BitField>) -> Self {
        self.bit_fields = bit_fields;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    pub fn padding_before(&self) -> usize {
        self.padding_before
    }

    pub fn padding_start(&self) -> usize {
        self.offset.saturating_sub(self.padding_before)
    }

    pub fn is_pointer(&self) -> bool {
        self.is_pointer
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bit_fields(&self) -> &[BitField] {
        &self.bit_fields
    }

    pub fn is_function_pointer(&self) -> bool {
        self.kind == FieldKind::FunctionPointer
    }
}

impl fmt::Display for LayoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ({} bytes)", self.name, self.offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_pointer_keeps_pointer_flag() {
        let field = LayoutField::new("cb", 0, 4).with_type_name("function_ptr");
        assert_eq!(field.kind(), FieldKind::FunctionPointer);
        assert!(!field.is_pointer());

        let field = LayoutField::new("cb", 0, 4).with_pointer(true).with_type_name("function_ptr");
        assert_eq!(field.kind(), FieldKind::FunctionPointer);
        assert!(field.is_pointer());
    }

    #[test]
    fn test_kind_independent_of_call_order() {
        let a = LayoutField::new("p", 0, 8).with_count(2).with_pointer(true).with_type_name("int");
        let b = LayoutField::new("p", 0, 8).with_type_name("int").with_pointer(true).with_count(2);
        assert_eq!(a.kind(), FieldKind::Pointer);
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.is_pointer(), b.is_pointer());
    }
}
