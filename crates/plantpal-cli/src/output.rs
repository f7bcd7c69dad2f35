//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::NaiveDate;
use serde::Serialize;

use plantpal_core::{watering_status, Plant, WateringStatus};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// A plant with its schedule, as emitted in JSON mode
#[derive(Serialize)]
struct PlantCard<'a> {
    #[serde(flatten)]
    plant: &'a Plant,
    #[serde(flatten)]
    status: WateringStatus,
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print one plant with its watering status
    pub fn print_plant(&self, plant: &Plant, today: NaiveDate) {
        let status = watering_status(plant, today);
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", plant.id);
                println!("Name:        {}", plant.name);
                println!("Type:        {}", plant.plant_type);
                println!(
                    "Water every: {} day{}",
                    plant.watering_frequency,
                    if plant.watering_frequency == 1 { "" } else { "s" }
                );
                println!("Sunlight:    {}", plant.sunlight);
                println!("Watered:     {}", plant.last_watered.format("%Y-%m-%d"));
                println!("Next:        {}", status.next_watering.format("%Y-%m-%d"));
                println!("Status:      {} ({})", status.badge(), status.describe());
                println!("Image:       {}", plant.image);
                println!("Added:       {}", plant.created_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => print_json(&PlantCard { plant, status }),
            OutputFormat::Quiet => println!("{}", plant.id),
        }
    }

    /// Print a list of plants, one line each
    pub fn print_plants(&self, plants: &[&Plant], today: NaiveDate) {
        match self.format {
            OutputFormat::Human => {
                if plants.is_empty() {
                    println!("No plants found.");
                    return;
                }
                for plant in plants {
                    let status = watering_status(plant, today);
                    println!(
                        "{} | {:<9} | {} | {} | {}",
                        short_id(&plant.id),
                        status.badge(),
                        truncate(&plant.name, 24),
                        truncate(&plant.plant_type, 12),
                        status.describe()
                    );
                }
                println!("\n{} plant(s)", plants.len());
            }
            OutputFormat::Json => {
                let cards: Vec<_> = plants
                    .iter()
                    .map(|&plant| PlantCard {
                        plant,
                        status: watering_status(plant, today),
                    })
                    .collect();
                print_json(&cards);
            }
            OutputFormat::Quiet => {
                for plant in plants {
                    println!("{}", plant.id);
                }
            }
        }
    }

    /// Print the due summary followed by the due plants
    pub fn print_due(&self, due_count: usize, total: usize, due: &[&Plant], today: NaiveDate) {
        match self.format {
            OutputFormat::Human => {
                if due_count == 0 {
                    println!("All {} plant(s) are happy. Nothing to water today.", total);
                    return;
                }
                println!("{} of {} plant(s) need water today.\n", due_count, total);
                self.print_plants(due, today);
            }
            OutputFormat::Json => {
                let cards: Vec<_> = due
                    .iter()
                    .map(|&plant| PlantCard {
                        plant,
                        status: watering_status(plant, today),
                    })
                    .collect();
                print_json(&serde_json::json!({
                    "dueCount": due_count,
                    "total": total,
                    "plants": cards,
                }));
            }
            OutputFormat::Quiet => println!("{}", due_count),
        }
    }

    /// Print the distinct plant types
    pub fn print_types(&self, types: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if types.is_empty() {
                    println!("No types found.");
                    return;
                }
                for t in types {
                    println!("{}", t);
                }
                println!("\n{} type(s)", types.len());
            }
            OutputFormat::Json => print_json(&types),
            OutputFormat::Quiet => {
                for t in types {
                    println!("{}", t);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// First eight characters of an id
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("Échevería élégante", 8), "Échev...");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3f2a9c1e-0000-4000-8000-000000000000"), "3f2a9c1e");
        assert_eq!(short_id("42"), "42");
    }

    #[test]
    fn test_plant_card_flattens_status() {
        let plant: Plant = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Fern",
            "type": "fern",
            "wateringFrequency": 3,
            "sunlight": "Low light",
            "lastWatered": "2024-01-01",
            "image": "",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let card = PlantCard {
            plant: &plant,
            status: watering_status(&plant, today),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["name"], "Fern");
        assert_eq!(json["nextWatering"], "2024-01-04");
        assert_eq!(json["daysUntil"], 2);
        assert_eq!(json["due"], false);
    }
}
