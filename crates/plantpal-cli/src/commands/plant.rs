//! Plant command handlers

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use plantpal_core::{NewPlant, Persistence, PlantStore, SortMode, Sunlight, TypeFilter};

use crate::output::Output;
use crate::prompt::Confirmation;

/// Fields collected by `plantpal add`
pub struct AddArgs {
    pub name: String,
    pub plant_type: Option<String>,
    pub every: Option<u32>,
    pub sunlight: Option<String>,
    pub last_watered: Option<NaiveDate>,
    pub image: Option<String>,
}

/// Add a plant
pub fn add<P: Persistence>(store: &mut PlantStore<P>, args: AddArgs, output: &Output) -> Result<()> {
    let input = NewPlant {
        name: args.name,
        plant_type: args.plant_type,
        watering_frequency: args.every,
        sunlight: args.sunlight.map(Sunlight::from),
        last_watered: args.last_watered,
        image: args.image,
    };

    let plant = store.add_plant(input)?;

    output.success(&format!("Added {}: {}", plant.name, plant.id));
    output.print_plant(&plant, store.today());
    Ok(())
}

/// List plants, filtered and sorted
pub fn list<P: Persistence>(
    store: &PlantStore<P>,
    type_filter: TypeFilter,
    sort: SortMode,
    output: &Output,
) -> Result<()> {
    let visible = store.visible(&type_filter, sort);
    output.print_plants(&visible, store.today());
    Ok(())
}

/// Show one plant
pub fn show<P: Persistence>(store: &PlantStore<P>, id: String, output: &Output) -> Result<()> {
    let id = resolve_plant_id(store, &id)?;
    let plant = store
        .get(&id)
        .with_context(|| format!("Plant not found: {}", id))?;
    output.print_plant(plant, store.today());
    Ok(())
}

/// Mark a plant as watered today
pub fn water<P: Persistence>(store: &mut PlantStore<P>, id: String, output: &Output) -> Result<()> {
    let id = resolve_plant_id(store, &id)?;
    if !store.mark_watered(&id) {
        bail!("Plant not found: {}", id);
    }

    if let Some(plant) = store.get(&id) {
        output.success(&format!("Watered {}", plant.name));
        output.print_plant(plant, store.today());
    }
    Ok(())
}

/// Delete a plant after confirmation
pub fn remove<P: Persistence>(
    store: &mut PlantStore<P>,
    id: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_plant_id(store, &id)?;

    let name = store.get(&id).map(|p| p.name.clone()).unwrap_or_default();

    let mut confirmation = if yes {
        Confirmation::Approved
    } else if output.should_prompt() {
        Confirmation::Interactive
    } else {
        Confirmation::Denied
    };

    if store.remove_plant(&id, &mut confirmation) {
        output.success(&format!("Deleted {}: {}", name, id));
        return Ok(());
    }

    if matches!(confirmation, Confirmation::Denied) {
        bail!("Not deleted {}: pass --yes to delete without a prompt", id);
    }
    output.message("Cancelled.");
    Ok(())
}

/// Plants that need water today
pub fn due<P: Persistence>(store: &PlantStore<P>, output: &Output) -> Result<()> {
    let due = store.due_plants();
    output.print_due(store.due_count(), store.len(), &due, store.today());
    Ok(())
}

/// Distinct plant types
pub fn types<P: Persistence>(store: &PlantStore<P>, output: &Output) -> Result<()> {
    output.print_types(&store.types());
    Ok(())
}

/// Resolve a full id or a unique id prefix
fn resolve_plant_id<P: Persistence>(store: &PlantStore<P>, id: &str) -> Result<String> {
    if store.get(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = store
        .plants()
        .iter()
        .filter(|p| p.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No plant found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple plants match '{}':", id);
            for plant in &matches {
                eprintln!("  {} - {}", plant.id, plant.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantpal_core::{FixedClock, MemoryPersistence};

    fn store() -> PlantStore<MemoryPersistence> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut store =
            PlantStore::load_with_clock(MemoryPersistence::new(), Box::new(FixedClock::on(today)));
        store
            .import_plants(r#"[{"id": "abc123", "name": "One"}, {"id": "abd456", "name": "Two"}]"#)
            .unwrap();
        store
    }

    #[test]
    fn test_resolve_full_and_prefix() {
        let store = store();
        assert_eq!(resolve_plant_id(&store, "abc123").unwrap(), "abc123");
        assert_eq!(resolve_plant_id(&store, "abd").unwrap(), "abd456");
    }

    #[test]
    fn test_resolve_ambiguous_and_missing() {
        let store = store();
        assert!(resolve_plant_id(&store, "ab").is_err());
        assert!(resolve_plant_id(&store, "zzz").is_err());
    }

    #[test]
    fn test_remove_without_confirmation_keeps_plant() {
        let mut store = store();
        let output = Output::new(crate::output::OutputFormat::Quiet);
        let err = remove(&mut store, "abc".to_string(), false, &output).unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert_eq!(store.len(), 2);

        remove(&mut store, "abc".to_string(), true, &output).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut store = store();
        let output = Output::new(crate::output::OutputFormat::Quiet);
        let args = AddArgs {
            name: "  ".to_string(),
            plant_type: None,
            every: None,
            sunlight: None,
            last_watered: None,
            image: None,
        };
        assert!(add(&mut store, args, &output).is_err());
        assert_eq!(store.len(), 2);
    }
}
