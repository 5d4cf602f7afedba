// Mon Jan 19 2026 - Alex

use thiserror::Error;

/// A layout that breaks the rules the grid renderer relies on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutContractError {
    #[error("Field {field} at offset {offset} comes before previous offset {previous}")]
    UnsortedFields {
        field: String,
        offset: usize,
        previous: usize,
    },
    #[error("Field {second} overlaps field {first}")]
    OverlappingFields { first: String, second: String },
    #[error("Field {field} ends at {end}, past total size {total_size}")]
    FieldOutOfBounds {
        field: String,
        end: usize,
        total_size: usize,
    },
    #[error("Padding of {padding} bytes before field {field} at offset {offset} starts before the struct")]
    PaddingBeforeStart {
        field: String,
        offset: usize,
        padding: usize,
    },
    #[error("Padding before field {field} overlaps field {previous}")]
    OverlappingPadding { field: String, previous: String },
    #[error("Invalid row width: {0}")]
    InvalidRowWidth(usize),
    #[error("Invalid max alignment: {0}")]
    InvalidAlignment(usize),
    #[error("Negative value for {what}: {value}")]
    NegativeValue { what: String, value: i64 },
}

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Unknown type: {0}")]
    UnknownType(String),
    #[error("No valid struct found")]
    NoStructFound,
    #[error("Struct not found: {0}")]
    StructNotFound(String),
    #[error("Struct {0} has no fields")]
    EmptyStruct(String),
    #[error("{0} is larger than the largest object size")]
    ObjectTooLarge(String),
    #[error("Nested struct depth exceeded while laying out {0}")]
    RecursionLimit(String),
    #[error("Layout contract violated: {0}")]
    Contract(#[from] LayoutContractError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
