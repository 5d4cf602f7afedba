// Sat Jan 24 2026 - Alex

pub mod config;
pub mod locator;
pub mod output;
pub mod render;
pub mod resolve;
pub mod structure;
pub mod ui;

pub use config::Config;
pub use locator::{SourceSpan, StructLocator};
pub use render::{render, GridModel, GridRenderer, LabelPolicy, LayoutStats, RenderError};
pub use resolve::{DefinitionProvider, SourceFilesProvider, TypeResolver};
pub use structure::{
    DeclarationParser, LayoutContractError, LayoutEngine, LayoutField, StructLayout, StructureError,
    StructureValidator,
};
