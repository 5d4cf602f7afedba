// Mon Jan 19 2026 - Alex

use crate::structure::LayoutField;

/// Computed memory layout of one struct.
///
/// Nothing here is checked on construction; run
/// [`StructureValidator`](crate::structure::StructureValidator) before trusting
/// the offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    name: Option<String>,
    total_size: usize,
    max_align: usize,
    pack_value: Option<usize>,
    fields: Vec<LayoutField>,
}

impl StructLayout {
    pub fn new(total_size: usize, max_align: usize) -> Self {
        Self {
            name: None,
            total_size,
            max_align,
            pack_value: None,
            fields: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_pack_value(mut self, pack_value: Option<usize>) -> Self {
        self.pack_value = pack_value;
        self
    }

    pub fn with_fields(mut self, fields: Vec<LayoutField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn add_field(&mut self, field: LayoutField) {
        self.fields.push(field);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn max_align(&self) -> usize {
        self.max_align
    }

    pub fn pack_value(&self) -> Option<usize> {
        self.pack_value
    }

    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&LayoutField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Bytes per grid row: the pack value when packed, the natural alignment otherwise.
    pub fn row_width(&self) -> usize {
        self.pack_value.unwrap_or(self.max_align)
    }

    pub fn data_bytes(&self) -> usize {
        self.fields.iter().map(|f| f.size()).sum()
    }

    /// Bytes between the end of the last field and the end of the struct.
    pub fn tail_padding(&self) -> usize {
        let data_end = self.fields.iter().map(|f| f.end()).max().unwrap_or(0);
        self.total_size.saturating_sub(data_end)
    }

    pub fn is_packed(&self) -> bool {
        self.pack_value.is_some()
    }
}
