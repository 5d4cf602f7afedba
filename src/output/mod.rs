// Fri Jan 23 2026 - Alex

pub mod json;
pub mod text;

pub use json::{GridJsonSerializer, JsonError};
pub use text::{TextGrid, UNITS_PER_CELL};
