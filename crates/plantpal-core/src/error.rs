//! Errors surfaced by plant operations
//!
//! Every variant is terminal at the operation boundary: the store is left
//! exactly as it was before the call.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum PlantError {
    /// Input rejected at creation time
    #[error("Invalid plant: {0}")]
    Validation(String),

    /// Import data is not valid JSON
    #[error("Failed to import: {0}")]
    Parse(#[source] serde_json::Error),

    /// Import data is valid JSON but not an array
    #[error("Failed to import: not an array (found {found})")]
    Shape { found: &'static str },

    /// Snapshot could not be written or read
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

pub type PlantResult<T> = Result<T, PlantError>;
