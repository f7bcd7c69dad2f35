//! Data models for PlantPal
//!
//! Defines the core data structures: Plant, Sunlight, Theme and the
//! add-plant form input. Field names serialize in camelCase so snapshots
//! and export files keep their established shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Watering interval applied when none (or an invalid one) is given
pub const DEFAULT_WATERING_FREQUENCY: u32 = 7;

/// Type applied when none is given
pub const UNKNOWN_TYPE: &str = "unknown";

/// A tracked houseplant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lowercase category, e.g. "fern"
    #[serde(rename = "type")]
    pub plant_type: String,
    /// Days between waterings, always >= 1
    pub watering_frequency: u32,
    /// Light preference
    pub sunlight: Sunlight,
    /// Calendar date of the last watering
    pub last_watered: NaiveDate,
    /// Image URL
    pub image: String,
    /// When this plant was added
    pub created_at: DateTime<Utc>,
}

/// Light preference for a plant
///
/// The three known values render as their display strings. Anything else
/// is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sunlight {
    #[default]
    BrightIndirect,
    Direct,
    Low,
    Other(String),
}

impl Sunlight {
    pub fn as_str(&self) -> &str {
        match self {
            Sunlight::BrightIndirect => "Bright indirect",
            Sunlight::Direct => "Direct sunlight",
            Sunlight::Low => "Low light",
            Sunlight::Other(s) => s,
        }
    }
}

impl fmt::Display for Sunlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Sunlight {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bright indirect" | "bright" | "indirect" => Sunlight::BrightIndirect,
            "direct sunlight" | "direct" => Sunlight::Direct,
            "low light" | "low" => Sunlight::Low,
            _ => Sunlight::Other(s),
        }
    }
}

impl From<&str> for Sunlight {
    fn from(s: &str) -> Self {
        Sunlight::from(s.to_string())
    }
}

impl From<Sunlight> for String {
    fn from(s: Sunlight) -> Self {
        match s {
            Sunlight::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}'. Use 'light' or 'dark'.", other)),
        }
    }
}

/// Input for adding a plant
///
/// Mirrors the add-plant form: only the name is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPlant {
    pub name: String,
    pub plant_type: Option<String>,
    pub watering_frequency: Option<u32>,
    pub sunlight: Option<Sunlight>,
    pub last_watered: Option<NaiveDate>,
    pub image: Option<String>,
}

impl NewPlant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn plant_type(mut self, plant_type: impl Into<String>) -> Self {
        self.plant_type = Some(plant_type.into());
        self
    }

    pub fn every(mut self, days: u32) -> Self {
        self.watering_frequency = Some(days);
        self
    }

    pub fn sunlight(mut self, sunlight: impl Into<Sunlight>) -> Self {
        self.sunlight = Some(sunlight.into());
        self
    }

    pub fn last_watered(mut self, date: NaiveDate) -> Self {
        self.last_watered = Some(date);
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}
