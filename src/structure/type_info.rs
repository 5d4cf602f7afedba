// Mon Jan 19 2026 - Alex

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSize {
    pub size: usize,
    pub align: usize,
}

impl TypeSize {
    pub const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }
}

impl fmt::Display for TypeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size {} align {}", self.size, self.align)
    }
}

const DEFAULT_TYPES: &[(&str, TypeSize)] = &[
    ("char", TypeSize::new(1, 1)),
    ("signed char", TypeSize::new(1, 1)),
    ("unsigned char", TypeSize::new(1, 1)),
    ("boolean", TypeSize::new(1, 1)),
    ("bool", TypeSize::new(1, 1)),
    ("short", TypeSize::new(2, 2)),
    ("unsigned short", TypeSize::new(2, 2)),
    ("int", TypeSize::new(4, 4)),
    ("unsigned", TypeSize::new(4, 4)),
    ("unsigned int", TypeSize::new(4, 4)),
    ("long", TypeSize::new(8, 8)),
    ("unsigned long", TypeSize::new(8, 8)),
    ("long long", TypeSize::new(8, 8)),
    ("unsigned long long", TypeSize::new(8, 8)),
    ("float", TypeSize::new(4, 4)),
    ("double", TypeSize::new(8, 8)),
    ("size_t", TypeSize::new(4, 4)),
    ("time_t", TypeSize::new(4, 4)),
    ("uint8", TypeSize::new(1, 1)),
    ("uint16", TypeSize::new(2, 2)),
    ("uint32", TypeSize::new(4, 4)),
    ("uint64", TypeSize::new(8, 8)),
    ("int8_t", TypeSize::new(1, 1)),
    ("uint8_t", TypeSize::new(1, 1)),
    ("int16_t", TypeSize::new(2, 2)),
    ("uint16_t", TypeSize::new(2, 2)),
    ("int32_t", TypeSize::new(4, 4)),
    ("uint32_t", TypeSize::new(4, 4)),
    ("int64_t", TypeSize::new(8, 8)),
    ("uint64_t", TypeSize::new(8, 8)),
    ("Std_ReturnType", TypeSize::new(1, 1)),
];

/// Sizes and alignments of named types plus the target pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTable {
    #[serde(default = "default_types")]
    pub types: IndexMap<String, TypeSize>,
    #[serde(default = "default_pointer")]
    pub pointer: TypeSize,
}

fn default_types() -> IndexMap<String, TypeSize> {
    DEFAULT_TYPES
        .iter()
        .map(|(name, size)| (name.to_string(), *size))
        .collect()
}

fn default_pointer() -> TypeSize {
    TypeSize::new(4, 4)
}

impl TypeTable {
    pub fn empty(pointer: TypeSize) -> Self {
        Self {
            types: IndexMap::new(),
            pointer,
        }
    }

    pub fn with_type(mut self, name: &str, size: TypeSize) -> Self {
        self.insert(name, size);
        self
    }

    pub fn with_pointer(mut self, pointer: TypeSize) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn insert(&mut self, name: &str, size: TypeSize) {
        self.types.insert(name.to_string(), size);
    }

    pub fn get(&self, name: &str) -> Option<TypeSize> {
        self.types.get(name).copied()
    }

    pub fn pointer(&self) -> TypeSize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self {
            types: default_types(),
            pointer: default_pointer(),
        }
    }
}
