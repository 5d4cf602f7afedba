// Mon Jan 19 2026 - Alex

use crate::structure::{BitField, LayoutField, StructLayout};

/// Appends fields in order, deriving each field's padding from the previous end.
pub struct StructureBuilder {
    layout: StructLayout,
    cursor: usize,
}

impl StructureBuilder {
    pub fn new(total_size: usize, max_align: usize) -> Self {
        Self {
            layout: StructLayout::new(total_size, max_align),
            cursor: 0,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.layout = self.layout.with_name(name);
        self
    }

    pub fn pack(mut self, pack_value: usize) -> Self {
        self.layout = self.layout.with_pack_value(Some(pack_value));
        self
    }

    pub fn scalar(self, name: &str, offset: usize, size: usize) -> Self {
        self.field(LayoutField::new(name, offset, size))
    }

    pub fn pointer(self, name: &str, offset: usize, size: usize) -> Self {
        self.field(LayoutField::new(name, offset, size).with_pointer(true))
    }

    pub fn array(self, name: &str, offset: usize, size: usize, count: usize) -> Self {
        self.field(LayoutField::new(name, offset, size).with_count(count))
    }

    pub fn bit_run(self, name: &str, offset: usize, size: usize, bits: &[(&str, u32)]) -> Self {
        let bit_fields = bits.iter().map(|(n, b)| BitField::new(*n, *b)).collect();
        self.field(LayoutField::new(name, offset, size).with_bit_fields(bit_fields))
    }

    /// Adds a field as-is, filling in padding from the current cursor when the field has none.
    pub fn field(mut self, field: LayoutField) -> Self {
        let field = if field.padding_before() == 0 && field.offset() > self.cursor {
            let padding = field.offset() - self.cursor;
            field.with_padding_before(padding)
        } else {
            field
        };
        self.cursor = self.cursor.max(field.end());
        self.layout.add_field(field);
        self
    }

    pub fn build(self) -> StructLayout {
        self.layout
    }
}
