//! Storage layer
//!
//! A small key-value capability the store persists through. The whole
//! plant collection is written as one JSON snapshot under `PLANTS_KEY`;
//! the theme lives under `THEME_KEY`.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FilePersistence, MemoryPersistence, Persistence, PLANTS_KEY, THEME_KEY};
