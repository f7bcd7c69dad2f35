//! PlantPal Core Library
//!
//! This crate provides the core functionality for PlantPal, a houseplant
//! care tracker: it records plants with a watering cadence, works out when
//! each one next needs water, and projects a filtered, sorted view.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = PlantStore::open()?;
//!
//! // Add a plant
//! store.add_plant(NewPlant::new("Monty").plant_type("monstera").every(7))?;
//!
//! // Query
//! let visible = store.visible(&TypeFilter::All, SortMode::NextWatering);
//! let due = store.due_count();
//! ```
//!
//! # Modules
//!
//! - `store`: Plant collection with load/save lifecycle (main entry point)
//! - `models`: Plant, Sunlight, Theme and add-plant input
//! - `normalize`: Shared defaulting for add, import and restore
//! - `schedule`: Watering date arithmetic and the clock capability
//! - `view`: Filtering, sorting and due counts
//! - `storage`: Key-value persistence backends
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::{PlantError, PlantResult};
pub use models::{NewPlant, Plant, Sunlight, Theme};
pub use normalize::{normalize_plant, PlantDraft};
pub use schedule::{
    days_until_next_watering, needs_watering_today, next_watering_date, watering_status, Clock,
    FixedClock, SystemClock, WateringStatus,
};
pub use storage::{FilePersistence, MemoryPersistence, Persistence, StorageError};
pub use store::{Confirm, PlantStore, IMPORT_LIMIT};
pub use view::{SortMode, TypeFilter};
