// Thu Jan 22 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid exclude pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("Definition lookup failed: {0}")]
    Provider(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
