//! Plant store
//!
//! `PlantStore` owns the ordered plant collection and the theme, restores
//! both from a [`Persistence`] backend at load time, and writes a full
//! snapshot after every mutation.
//!
//! ## Failure policy
//!
//! - A snapshot that cannot be read at startup is logged and the store
//!   starts empty.
//! - A snapshot that cannot be written is logged; the in-memory state stays
//!   authoritative for the rest of the session.
//! - Validation, parse and shape errors abort the operation and leave the
//!   store untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = PlantStore::open()?;
//! store.add_plant(NewPlant::new("Monty").plant_type("monstera"))?;
//! let due = store.due_count();
//! ```

use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PlantError, PlantResult};
use crate::models::{NewPlant, Plant, Theme};
use crate::normalize::{generate_id, normalize_plant, PlantDraft};
use crate::schedule::{needs_watering_today, Clock, SystemClock};
use crate::storage::{FilePersistence, Persistence, StorageResult, PLANTS_KEY, THEME_KEY};
use crate::view::{self, SortMode, TypeFilter};

/// Maximum number of records accepted from one import
pub const IMPORT_LIMIT: usize = 500;

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// The plant collection plus its persistence backend
pub struct PlantStore<P: Persistence = FilePersistence> {
    plants: Vec<Plant>,
    theme: Theme,
    backend: P,
    clock: Box<dyn Clock>,
}

impl PlantStore<FilePersistence> {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::open_with_config(&config))
    }

    /// Open the store rooted at the configured data directory
    pub fn open_with_config(config: &Config) -> Self {
        Self::load(FilePersistence::from_config(config))
    }
}

impl<P: Persistence> PlantStore<P> {
    /// Restore from `backend` using the system clock
    pub fn load(backend: P) -> Self {
        Self::load_with_clock(backend, Box::new(SystemClock))
    }

    /// Restore from `backend` with an explicit clock
    pub fn load_with_clock(backend: P, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            plants: Vec::new(),
            theme: Theme::default(),
            backend,
            clock,
        };
        store.plants = store.restore_plants();
        store.theme = store.restore_theme();
        info!("Loaded {} plant(s)", store.plants.len());
        store
    }

    fn restore_plants(&self) -> Vec<Plant> {
        let raw = match self.backend.get(PLANTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to load plants, starting empty: {}", e);
                return Vec::new();
            }
        };

        let elements = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(elements)) => elements,
            Ok(other) => {
                warn!(
                    "Plant snapshot is not an array (found {}), starting empty",
                    json_kind(&other)
                );
                return Vec::new();
            }
            Err(e) => {
                warn!("Plant snapshot is not valid JSON, starting empty: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        elements
            .iter()
            .map(|element| self.clean(PlantDraft::from_json(element), &mut seen))
            .collect()
    }

    fn restore_theme(&self) -> Theme {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to load theme: {}", e);
                Theme::default()
            }
        }
    }

    /// Normalize a draft, re-keying it if its id is already taken
    fn clean(&self, draft: PlantDraft, seen: &mut HashSet<String>) -> Plant {
        let mut plant = normalize_plant(draft, self.clock.today(), self.clock.now());
        while !seen.insert(plant.id.clone()) {
            debug!("Duplicate plant id {}, assigning a new one", plant.id);
            plant.id = generate_id();
        }
        plant
    }

    // ==================== Persistence ====================

    /// Write the full plant snapshot
    pub fn save(&mut self) -> StorageResult<()> {
        let snapshot = serde_json::to_string(&self.plants)?;
        self.backend.set(PLANTS_KEY, &snapshot)
    }

    /// Save, logging instead of failing
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!("Failed to save plants: {}", e);
        }
    }

    /// Access the backend
    pub fn backend(&self) -> &P {
        &self.backend
    }

    /// Mutable access to the backend
    pub fn backend_mut(&mut self) -> &mut P {
        &mut self.backend
    }

    // ==================== Mutations ====================

    /// Add a plant at the front of the collection
    pub fn add_plant(&mut self, input: NewPlant) -> PlantResult<Plant> {
        if input.name.trim().is_empty() {
            return Err(PlantError::Validation(
                "Please give your plant a name.".to_string(),
            ));
        }

        let mut seen: HashSet<String> = self.plants.iter().map(|p| p.id.clone()).collect();
        let plant = self.clean(input.into(), &mut seen);
        info!("Added plant {} ({})", plant.name, plant.id);

        self.plants.insert(0, plant.clone());
        self.persist();
        Ok(plant)
    }

    /// Record a watering today; unknown ids are ignored
    pub fn mark_watered(&mut self, id: &str) -> bool {
        let today = self.clock.today();
        let Some(plant) = self.plants.iter_mut().find(|p| p.id == id) else {
            debug!("mark_watered: no plant with id {}", id);
            return false;
        };
        plant.last_watered = today;
        info!("Watered {} ({})", plant.name, plant.id);
        self.persist();
        true
    }

    /// Remove a plant after confirmation
    ///
    /// Returns `false` when the id is unknown or the user declined.
    pub fn remove_plant(&mut self, id: &str, confirm: &mut impl Confirm) -> bool {
        let Some(pos) = self.plants.iter().position(|p| p.id == id) else {
            debug!("remove_plant: no plant with id {}", id);
            return false;
        };
        let prompt = format!("Delete {}?", self.plants[pos].name);
        if !confirm.confirm(&prompt) {
            debug!("Deletion of {} declined", id);
            return false;
        }
        let removed = self.plants.remove(pos);
        info!("Removed plant {} ({})", removed.name, removed.id);
        self.persist();
        true
    }

    /// Merge plants from a JSON array into the front of the collection
    ///
    /// Returns how many records were imported. At most [`IMPORT_LIMIT`]
    /// are taken; the rest are dropped.
    pub fn import_plants(&mut self, raw: &str) -> PlantResult<usize> {
        let value: Value = serde_json::from_str(raw).map_err(PlantError::Parse)?;
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(PlantError::Shape {
                    found: json_kind(&other),
                })
            }
        };

        if elements.len() > IMPORT_LIMIT {
            warn!(
                "Import has {} records, keeping the first {}",
                elements.len(),
                IMPORT_LIMIT
            );
        }

        let mut seen: HashSet<String> = self.plants.iter().map(|p| p.id.clone()).collect();
        let batch: Vec<Plant> = elements
            .iter()
            .take(IMPORT_LIMIT)
            .map(|element| self.clean(PlantDraft::from_json(element), &mut seen))
            .collect();

        let count = batch.len();
        self.plants.splice(0..0, batch);
        info!("Imported {} plant(s)", count);
        self.persist();
        Ok(count)
    }

    /// Pretty-printed JSON of the whole collection
    pub fn export_plants(&self) -> PlantResult<String> {
        serde_json::to_string_pretty(&self.plants)
            .map_err(|e| PlantError::Persistence(e.into()))
    }

    // ==================== Theme ====================

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.backend.set(THEME_KEY, theme.as_str()) {
            warn!("Failed to save theme: {}", e);
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggled();
        self.set_theme(theme);
        theme
    }

    // ==================== Queries ====================

    /// All plants in stored order (newest additions first)
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn get(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Today according to the store's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Distinct plant types, for the filter control
    pub fn types(&self) -> Vec<String> {
        view::distinct_types(&self.plants)
    }

    /// The filtered and sorted list
    pub fn visible(&self, type_filter: &TypeFilter, mode: SortMode) -> Vec<&Plant> {
        view::project(&self.plants, type_filter, mode)
    }

    /// Number of plants due today, regardless of any filter
    pub fn due_count(&self) -> usize {
        view::due_count(&self.plants, self.clock.today())
    }

    /// Plants due today, soonest first
    pub fn due_plants(&self) -> Vec<&Plant> {
        let today = self.clock.today();
        let mut due: Vec<&Plant> = self
            .plants
            .iter()
            .filter(|p| needs_watering_today(p, today))
            .collect();
        view::sort(&mut due, SortMode::NextWatering);
        due
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
