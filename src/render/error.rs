// Wed Jan 21 2026 - Alex

use crate::structure::LayoutContractError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Layout contract violated: {0}")]
    Contract(#[from] LayoutContractError),
    #[error("Invalid visual scale: {0}")]
    InvalidScale(f64),
}
