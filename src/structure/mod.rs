// Mon Jan 19 2026 - Alex

pub mod alignment;
pub mod builder;
pub mod engine;
pub mod error;
pub mod field;
pub mod layout;
pub mod parser;
pub mod serializer;
pub mod type_info;
pub mod validator;

pub use alignment::Alignment;
pub use builder::StructureBuilder;
pub use engine::{LayoutEngine, MAX_NESTING_DEPTH, MAX_OBJECT_SIZE};
pub use error::{LayoutContractError, StructureError};
pub use field::{BitField, FieldKind, LayoutField};
pub use layout::StructLayout;
pub use parser::{DeclarationParser, FieldDecl, StructDeclaration};
pub use serializer::{SerializableBitField, SerializableField, SerializableLayout};
pub use type_info::{TypeSize, TypeTable};
pub use validator::StructureValidator;
