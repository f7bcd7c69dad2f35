//! Record normalization
//!
//! Every path that creates a plant (the add form, file import, snapshot
//! restore) goes through [`normalize_plant`], so defaults are applied in
//! exactly one place.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{NewPlant, Plant, Sunlight, DEFAULT_WATERING_FREQUENCY, UNKNOWN_TYPE};

/// Generic fallback image
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&w=800&q=60";

/// Default images keyed by plant type
const TYPE_IMAGES: &[(&str, &str)] = &[
    (
        "succulent",
        "https://images.unsplash.com/photo-1524592831667-2b2d1b1f3b76?auto=format&fit=crop&w=800&q=60",
    ),
    (
        "fern",
        "https://images.unsplash.com/photo-1501004318641-b39e6451bec6?auto=format&fit=crop&w=800&q=60",
    ),
    (
        "monstera",
        "https://images.unsplash.com/photo-1535905748047-14a1d3a7a9d8?auto=format&fit=crop&w=800&q=60",
    ),
    (
        "fiddle",
        "https://images.unsplash.com/photo-1536104968055-4d61aa56cc07?auto=format&fit=crop&w=800&q=60",
    ),
];

/// Image to show for a plant type when none was supplied
pub fn default_image(plant_type: &str) -> &'static str {
    let key = plant_type.trim().to_lowercase();
    TYPE_IMAGES
        .iter()
        .find(|(t, _)| *t == key)
        .map(|(_, url)| *url)
        .unwrap_or(DEFAULT_IMAGE)
}

/// A plant with any subset of fields known
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub plant_type: Option<String>,
    pub watering_frequency: Option<u32>,
    pub sunlight: Option<Sunlight>,
    pub last_watered: Option<NaiveDate>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PlantDraft {
    /// Coerce one loosely-typed JSON element
    ///
    /// Wrong-typed or unparseable fields are treated as missing. Unknown
    /// keys are ignored. A non-object value yields an empty draft.
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| value.get(key);
        Self {
            id: field("id").and_then(id_value),
            name: field("name").and_then(string_value),
            plant_type: field("type").and_then(string_value),
            watering_frequency: field("wateringFrequency").and_then(frequency_value),
            sunlight: field("sunlight")
                .and_then(string_value)
                .map(Sunlight::from),
            last_watered: field("lastWatered")
                .and_then(Value::as_str)
                .and_then(parse_date),
            image: field("image").and_then(string_value),
            created_at: field("createdAt")
                .and_then(Value::as_str)
                .and_then(parse_instant),
        }
    }
}

impl From<NewPlant> for PlantDraft {
    fn from(input: NewPlant) -> Self {
        Self {
            id: None,
            name: Some(input.name),
            plant_type: input.plant_type,
            watering_frequency: input.watering_frequency,
            sunlight: input.sunlight,
            last_watered: input.last_watered,
            image: input.image,
            created_at: None,
        }
    }
}

/// Build a complete plant, filling every missing field with its default
///
/// `today` and `now` supply the date and instant defaults.
pub fn normalize_plant(draft: PlantDraft, today: NaiveDate, now: DateTime<Utc>) -> Plant {
    let plant_type = draft
        .plant_type
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

    let image = draft
        .image
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| default_image(&plant_type).to_string());

    Plant {
        id: draft
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_id),
        name: draft
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unnamed".to_string()),
        plant_type,
        watering_frequency: draft
            .watering_frequency
            .filter(|f| *f >= 1)
            .unwrap_or(DEFAULT_WATERING_FREQUENCY),
        sunlight: draft.sunlight.unwrap_or_default(),
        last_watered: draft.last_watered.unwrap_or(today),
        image,
        created_at: draft.created_at.unwrap_or(now),
    }
}

/// Fresh opaque plant id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts numbers and numeric strings; fractions are truncated
fn frequency_value(value: &Value) -> Option<u32> {
    let days = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if days.is_finite() && days >= 1.0 && days <= f64::from(u32::MAX) {
        Some(days as u32)
    } else {
        None
    }
}

/// Parse a calendar date from a date, naive datetime or RFC 3339 string
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-04-02T10:00:00Z".parse().unwrap()
    }

    fn normalize(value: Value) -> Plant {
        normalize_plant(PlantDraft::from_json(&value), today(), now())
    }

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let plant = normalize(json!({}));
        assert!(!plant.id.is_empty());
        assert_eq!(plant.name, "Unnamed");
        assert_eq!(plant.plant_type, "unknown");
        assert_eq!(plant.watering_frequency, 7);
        assert_eq!(plant.sunlight, Sunlight::BrightIndirect);
        assert_eq!(plant.last_watered, today());
        assert_eq!(plant.image, DEFAULT_IMAGE);
        assert_eq!(plant.created_at, now());
    }

    #[test]
    fn test_fields_are_kept() {
        let plant = normalize(json!({
            "id": "1700000000000",
            "name": "Fiona",
            "type": "Fern",
            "wateringFrequency": 3,
            "sunlight": "Low light",
            "lastWatered": "2024-03-30",
            "image": "https://example.com/f.jpg",
            "createdAt": "2024-03-01T12:00:00.000Z",
            "extra": "ignored"
        }));
        assert_eq!(plant.id, "1700000000000");
        assert_eq!(plant.name, "Fiona");
        assert_eq!(plant.plant_type, "fern");
        assert_eq!(plant.watering_frequency, 3);
        assert_eq!(plant.sunlight, Sunlight::Low);
        assert_eq!(plant.last_watered, NaiveDate::from_ymd_opt(2024, 3, 30).unwrap());
        assert_eq!(plant.image, "https://example.com/f.jpg");
        assert_eq!(plant.created_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_frequency_coercion() {
        assert_eq!(normalize(json!({"wateringFrequency": "10"})).watering_frequency, 10);
        assert_eq!(normalize(json!({"wateringFrequency": 2.9})).watering_frequency, 2);
        assert_eq!(normalize(json!({"wateringFrequency": "abc"})).watering_frequency, 7);
        assert_eq!(normalize(json!({"wateringFrequency": 0})).watering_frequency, 7);
        assert_eq!(normalize(json!({"wateringFrequency": -3})).watering_frequency, 7);
        assert_eq!(normalize(json!({"wateringFrequency": null})).watering_frequency, 7);
        assert_eq!(normalize(json!({"wateringFrequency": true})).watering_frequency, 7);
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        assert_eq!(normalize(json!({"id": 42})).id, "42");
    }

    #[test]
    fn test_blank_strings_fall_back() {
        let plant = normalize(json!({"name": "   ", "type": "", "image": " "}));
        assert_eq!(plant.name, "Unnamed");
        assert_eq!(plant.plant_type, "unknown");
        assert_eq!(plant.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_unparseable_dates_fall_back() {
        let plant = normalize(json!({"lastWatered": "yesterday", "createdAt": 17}));
        assert_eq!(plant.last_watered, today());
        assert_eq!(plant.created_at, now());
    }

    #[test]
    fn test_non_object_is_all_defaults() {
        let plant = normalize(json!("just a string"));
        assert_eq!(plant.name, "Unnamed");
    }

    #[test]
    fn test_type_keyed_image() {
        let plant = normalize(json!({"type": "Succulent"}));
        assert_eq!(plant.image, default_image("succulent"));
        assert_ne!(plant.image, DEFAULT_IMAGE);
        assert_eq!(default_image("cactus"), DEFAULT_IMAGE);
    }

    #[test]
    fn test_from_new_plant() {
        let input = NewPlant::new("  Ficus  ").plant_type("Fiddle").every(0);
        let plant = normalize_plant(input.into(), today(), now());
        assert_eq!(plant.name, "Ficus");
        assert_eq!(plant.plant_type, "fiddle");
        assert_eq!(plant.watering_frequency, 7);
        assert_eq!(plant.image, default_image("fiddle"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_date("2024-01-01"), Some(expected));
        assert_eq!(parse_date("2024-01-01T09:15:00"), Some(expected));
        assert!(parse_date("2024-01-01T12:00:00Z").is_some());
        assert_eq!(parse_date("01/01/2024"), None);
    }
}
