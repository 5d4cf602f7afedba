// Mon Jan 19 2026 - Alex

use crate::structure::{LayoutContractError, StructLayout};

/// Checks the preconditions of the grid renderer and rejects the whole layout on the first violation.
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, layout: &StructLayout) -> Result<(), LayoutContractError> {
        if layout.max_align() == 0 {
            return Err(LayoutContractError::InvalidAlignment(0));
        }
        if layout.row_width() == 0 {
            return Err(LayoutContractError::InvalidRowWidth(0));
        }

        let mut previous: Option<(&str, usize, usize)> = None;

        for field in layout.fields() {
            let end = field
                .offset()
                .checked_add(field.size())
                .filter(|&end| end <= layout.total_size())
                .ok_or_else(|| LayoutContractError::FieldOutOfBounds {
                    field: field.name().to_string(),
                    end: field.offset().saturating_add(field.size()),
                    total_size: layout.total_size(),
                })?;

            if field.padding_before() > field.offset() {
                return Err(LayoutContractError::PaddingBeforeStart {
                    field: field.name().to_string(),
                    offset: field.offset(),
                    padding: field.padding_before(),
                });
            }

            if let Some((prev_name, prev_offset, prev_end)) = previous {
                if field.offset() < prev_offset {
                    return Err(LayoutContractError::UnsortedFields {
                        field: field.name().to_string(),
                        offset: field.offset(),
                        previous: prev_offset,
                    });
                }
                if field.offset() < prev_end {
                    return Err(LayoutContractError::OverlappingFields {
                        first: prev_name.to_string(),
                        second: field.name().to_string(),
                    });
                }
                if field.padding_start() < prev_end {
                    return Err(LayoutContractError::OverlappingPadding {
                        field: field.name().to_string(),
                        previous: prev_name.to_string(),
                    });
                }
            }

            previous = Some((field.name(), field.offset(), end));
        }

        Ok(())
    }
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new()
    }
}
