//! View projection
//!
//! Derives the visible plant list (filter, then sort) and aggregate counts
//! from the full collection. Nothing here mutates the collection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Plant;
use crate::schedule::{needs_watering_today, next_watering_date};

/// Which plant types are visible
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Type(String),
}

impl TypeFilter {
    pub fn matches(&self, plant: &Plant) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Type(t) => plant.plant_type == *t,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            TypeFilter::All
        } else {
            TypeFilter::Type(s.to_string())
        })
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Type(t) => f.write_str(t),
        }
    }
}

/// Ordering of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Soonest next watering first
    #[default]
    NextWatering,
    /// Alphabetical by name
    Name,
    /// Newest first
    CreatedAt,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::NextWatering => "nextWatering",
            SortMode::Name => "name",
            SortMode::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nextWatering" | "next-watering" | "next" => Ok(SortMode::NextWatering),
            "name" => Ok(SortMode::Name),
            "createdAt" | "created-at" | "newest" => Ok(SortMode::CreatedAt),
            other => Err(format!(
                "Unknown sort mode '{}'. Use nextWatering, name or createdAt.",
                other
            )),
        }
    }
}

/// Non-empty plant types present in the collection, sorted
pub fn distinct_types(plants: &[Plant]) -> Vec<String> {
    plants
        .iter()
        .filter(|p| !p.plant_type.is_empty())
        .map(|p| p.plant_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Plants matching the filter, in collection order
pub fn filter<'a>(plants: &'a [Plant], type_filter: &TypeFilter) -> Vec<&'a Plant> {
    plants.iter().filter(|p| type_filter.matches(p)).collect()
}

/// Sort in place; stable, so equal keys keep their relative order
pub fn sort(plants: &mut [&Plant], mode: SortMode) {
    match mode {
        SortMode::NextWatering => plants.sort_by_key(|p| next_watering_date(p)),
        SortMode::Name => plants.sort_by_cached_key(|p| name_key(&p.name)),
        SortMode::CreatedAt => plants.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Collation key for names
///
/// Accents and case are ignored first, so "Échevéria" sits between "Aloe"
/// and "Zamioculcas". Ties fall back to case-folded text, then raw bytes.
fn name_key(name: &str) -> (String, String, String) {
    let base = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    (base, name.to_lowercase(), name.to_string())
}

/// Filter then sort
pub fn project<'a>(plants: &'a [Plant], type_filter: &TypeFilter, mode: SortMode) -> Vec<&'a Plant> {
    let mut visible = filter(plants, type_filter);
    sort(&mut visible, mode);
    visible
}

/// Number of plants due today across the whole collection
pub fn due_count(plants: &[Plant], today: NaiveDate) -> usize {
    plants
        .iter()
        .filter(|p| needs_watering_today(p, today))
        .count()
}
