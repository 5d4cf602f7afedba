// Tue Jan 20 2026 - Alex

use crate::structure::{
    Alignment, BitField, FieldDecl, FieldKind, LayoutField, StructDeclaration, StructLayout, StructureError,
    TypeSize, TypeTable,
};
use indexmap::IndexMap;
use itertools::Itertools;

/// Deepest chain of struct-typed members followed before giving up.
pub const MAX_NESTING_DEPTH: usize = 16;

/// Largest object size a C implementation can address (`PTRDIFF_MAX`).
pub const MAX_OBJECT_SIZE: usize = isize::MAX as usize;

/// Computes offsets, padding and alignment for parsed struct declarations.
///
/// Type sizes come from the [`TypeTable`] first, then from other declarations
/// known to the engine (laid out with natural packing). Consecutive bit-fields
/// of the same type share one storage unit while their widths fit in it.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    types: TypeTable,
    declarations: IndexMap<String, StructDeclaration>,
}

impl LayoutEngine {
    pub fn new(types: TypeTable) -> Self {
        Self {
            types,
            declarations: IndexMap::new(),
        }
    }

    pub fn with_declarations(mut self, declarations: impl IntoIterator<Item = StructDeclaration>) -> Self {
        for declaration in declarations {
            self.add_declaration(declaration);
        }
        self
    }

    /// Keeps the first declaration seen for a name.
    pub fn add_declaration(&mut self, declaration: StructDeclaration) {
        if !self.declarations.contains_key(&declaration.name) {
            self.declarations.insert(declaration.name.clone(), declaration);
        }
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn declaration(&self, name: &str) -> Option<&StructDeclaration> {
        self.declarations.get(name)
    }

    pub fn compute(&self, name: &str, pack: Option<usize>) -> Result<StructLayout, StructureError> {
        let declaration = self
            .declarations
            .get(name)
            .ok_or_else(|| StructureError::StructNotFound(name.to_string()))?;
        self.compute_declaration(declaration, pack)
    }

    pub fn compute_declaration(
        &self,
        declaration: &StructDeclaration,
        pack: Option<usize>,
    ) -> Result<StructLayout, StructureError> {
        let pack = pack.filter(|&p| p > 0);
        let layout = self.layout_at_depth(declaration, pack, 0)?;
        log::debug!(
            "Laid out {}: {} bytes, max align {}, {} fields",
            declaration.name,
            layout.total_size(),
            layout.max_align(),
            layout.fields().len()
        );
        Ok(layout)
    }

    fn layout_at_depth(
        &self,
        declaration: &StructDeclaration,
        pack: Option<usize>,
        depth: usize,
    ) -> Result<StructLayout, StructureError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(StructureError::RecursionLimit(declaration.name.clone()));
        }
        if declaration.fields.is_empty() {
            return Err(StructureError::EmptyStruct(declaration.name.clone()));
        }

        let fields = &declaration.fields;
        let mut layout_fields = Vec::with_capacity(fields.len());
        let mut current_offset = 0usize;
        let mut max_align = 1usize;
        let mut i = 0;

        while i < fields.len() {
            let field = &fields[i];

            if field.bit_width.is_some() {
                let storage = self.type_size(&field.type_name, depth)?;
                max_align = max_align.max(storage.align);

                let alignment = Alignment::packed(storage.align, pack);
                let padding = alignment.padding_for(current_offset);
                let offset = Self::checked_end(&field.name, current_offset, padding)?;

                let run = Self::bit_run(&fields[i..], storage.size.saturating_mul(8));
                let bit_fields: Vec<BitField> = run
                    .iter()
                    .map(|f| BitField::new(f.name.clone(), f.bit_width.unwrap_or(0)))
                    .collect();

                layout_fields.push(
                    LayoutField::new(run.iter().map(|f| f.name.as_str()).join(", "), offset, storage.size)
                        .with_type_name(field.type_name.clone())
                        .with_padding_before(padding)
                        .with_bit_fields(bit_fields),
                );

                current_offset = Self::checked_end(&field.name, offset, storage.size)?;
                i += run.len();
                continue;
            }

            let unit = if field.is_pointer || field.is_function_pointer {
                self.types.pointer()
            } else {
                self.type_size(&field.type_name, depth)?
            };

            let alignment = Alignment::packed(unit.align, pack);
            let padding = alignment.padding_for(current_offset);
            let offset = Self::checked_end(&field.name, current_offset, padding)?;
            let size = unit
                .size
                .checked_mul(field.array_len)
                .ok_or_else(|| StructureError::ObjectTooLarge(field.name.clone()))?;
            let end = Self::checked_end(&field.name, offset, size)?;

            layout_fields.push(
                LayoutField::new(field.name.clone(), offset, size)
                    .with_type_name(field.type_name.clone())
                    .with_padding_before(padding)
                    .with_pointer(field.is_pointer)
                    .with_array(field.array_len > 1, field.array_len),
            );

            current_offset = end;
            max_align = max_align.max(unit.align);
            i += 1;
        }

        let tail = Alignment::packed(max_align, pack).padding_for(current_offset);
        let total_size = Self::checked_end(&declaration.name, current_offset, tail)?;

        Ok(StructLayout::new(total_size, max_align)
            .with_name(declaration.name.clone())
            .with_pack_value(pack)
            .with_fields(layout_fields))
    }

    /// `offset + len`, rejected past [`MAX_OBJECT_SIZE`].
    fn checked_end(name: &str, offset: usize, len: usize) -> Result<usize, StructureError> {
        offset
            .checked_add(len)
            .filter(|&end| end <= MAX_OBJECT_SIZE)
            .ok_or_else(|| StructureError::ObjectTooLarge(name.to_string()))
    }

    /// Leading bit-fields that share the first one's type and fit in `unit_bits`.
    /// Always takes at least the first field.
    fn bit_run(fields: &[FieldDecl], unit_bits: usize) -> &[FieldDecl] {
        let Some(first) = fields.first() else {
            return fields;
        };

        let mut used = 0usize;
        let mut len = 0;
        for field in fields {
            let Some(bits) = field.bit_width else {
                break;
            };
            if field.type_name != first.type_name {
                break;
            }
            if len > 0 && used + bits as usize > unit_bits {
                break;
            }
            used += bits as usize;
            len += 1;
        }
        &fields[..len]
    }

    fn type_size(&self, type_name: &str, depth: usize) -> Result<TypeSize, StructureError> {
        if let Some(size) = self.types.get(type_name) {
            return Ok(size);
        }
        if let Some(nested) = self.declarations.get(type_name) {
            let layout = self.layout_at_depth(nested, None, depth + 1)?;
            return Ok(TypeSize::new(layout.total_size(), layout.max_align()));
        }
        if type_name == FieldKind::FUNCTION_POINTER_TAG {
            return Ok(self.types.pointer());
        }
        Err(StructureError::UnknownType(type_name.to_string()))
    }
}
