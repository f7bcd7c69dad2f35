//! Import and export command handlers

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};

use plantpal_core::{Persistence, PlantStore};

use crate::output::Output;

/// Default export file name
pub const EXPORT_FILE_NAME: &str = "plantpal_export.json";

/// Write the collection as pretty JSON to a file, or stdout for `-`
pub fn export<P: Persistence>(
    store: &PlantStore<P>,
    destination: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let json = store.export_plants()?;
    let destination = destination.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

    if destination.as_os_str() == "-" {
        println!("{}", json);
        return Ok(());
    }

    fs::write(&destination, json)
        .with_context(|| format!("Failed to write export file: {:?}", destination))?;
    output.success(&format!(
        "Exported {} plant(s) to {}",
        store.len(),
        destination.display()
    ));
    Ok(())
}

/// Merge plants from a JSON file, or stdin for `-`
pub fn import<P: Persistence>(store: &mut PlantStore<P>, source: PathBuf, output: &Output) -> Result<()> {
    let raw = if source.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read import data from stdin")?;
        buf
    } else {
        fs::read_to_string(&source)
            .with_context(|| format!("Failed to read import file: {:?}", source))?
    };

    let count = store.import_plants(&raw)?;
    output.success(&format!("Imported {} plants (merged).", count));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use plantpal_core::{MemoryPersistence, NewPlant};
    use tempfile::TempDir;

    #[test]
    fn test_export_then_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plants.json");
        let output = Output::new(OutputFormat::Quiet);

        let mut source = PlantStore::load(MemoryPersistence::new());
        source.add_plant(NewPlant::new("Pothos").every(5)).unwrap();
        export(&source, Some(path.clone()), &output).unwrap();

        let mut target = PlantStore::load(MemoryPersistence::new());
        import(&mut target, path, &output).unwrap();
        assert_eq!(target.plants(), source.plants());
    }

    #[test]
    fn test_import_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let output = Output::new(OutputFormat::Quiet);
        let mut store = PlantStore::load(MemoryPersistence::new());

        let result = import(&mut store, temp_dir.path().join("nope.json"), &output);
        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_malformed_file_keeps_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let output = Output::new(OutputFormat::Quiet);

        let mut store = PlantStore::load(MemoryPersistence::new());
        store.add_plant(NewPlant::new("Keep me")).unwrap();

        assert!(import(&mut store, path, &output).is_err());
        assert_eq!(store.len(), 1);
    }
}
