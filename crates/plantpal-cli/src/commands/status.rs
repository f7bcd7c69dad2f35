//! Status command handler

use anyhow::Result;

use plantpal_core::{Config, FilePersistence, PlantStore};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &PlantStore<FilePersistence>, config: &Config, output: &Output) -> Result<()> {
    let size = store.backend().size_on_disk();
    let due = store.due_count();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "storage_bytes": size,
                    "theme": store.theme(),
                    "counts": {
                        "plants": store.len(),
                        "types": store.types().len(),
                        "due_today": due
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", due);
        }
        OutputFormat::Human => {
            println!("PlantPal Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Size:     {}", human_size(size));
            println!();
            println!("Garden:");
            println!("  Plants:    {}", store.len());
            println!("  Types:     {}", store.types().len());
            println!("  Due today: {}", due);
            println!();
            println!("Theme: {}", store.theme());
        }
    }

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
