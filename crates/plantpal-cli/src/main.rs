//! PlantPal CLI
//!
//! Command-line interface for PlantPal - houseplant watering tracker.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plantpal_core::{Config, PlantStore, SortMode, TypeFilter};

mod commands;
mod output;
mod prompt;

use commands::plant::AddArgs;
use commands::theme::ThemeAction;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "plantpal")]
#[command(about = "PlantPal - Keep track of when your houseplants need water")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a plant
    Add {
        /// Plant name
        name: String,
        /// Plant type, e.g. fern or succulent
        #[arg(short = 't', long = "type")]
        plant_type: Option<String>,
        /// Days between waterings
        #[arg(short, long)]
        every: Option<u32>,
        /// Light preference (Bright indirect, Direct sunlight, Low light)
        #[arg(short, long)]
        sunlight: Option<String>,
        /// Date of last watering (YYYY-MM-DD, defaults to today)
        #[arg(short = 'w', long, value_parser = parse_date)]
        last_watered: Option<NaiveDate>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// List plants
    #[command(alias = "ls")]
    List {
        /// Only show this type ("all" for everything)
        #[arg(short = 't', long = "type", default_value = "all")]
        plant_type: TypeFilter,
        /// Sort order: nextWatering, name or createdAt
        #[arg(short, long)]
        sort: Option<SortMode>,
    },
    /// Show plant details
    Show {
        /// Plant ID (full or prefix)
        id: String,
    },
    /// Mark a plant as watered today
    Water {
        /// Plant ID (full or prefix)
        id: String,
    },
    /// Delete a plant
    #[command(alias = "rm")]
    Remove {
        /// Plant ID (full or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show plants that need water today
    Due,
    /// List plant types
    Types,
    /// Export all plants as JSON
    Export {
        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import plants from a JSON file (merged with existing plants)
    Import {
        /// JSON file ("-" for stdin)
        file: PathBuf,
    },
    /// Show or change the theme (light, dark, toggle)
    Theme {
        action: Option<ThemeAction>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage location and plant counts
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, default_sort)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config = Config::load_with_cli_override(config_path)?;
    init_logging(&config);

    let mut store = PlantStore::open_with_config(&config);

    match cli.command {
        Commands::Add {
            name,
            plant_type,
            every,
            sunlight,
            last_watered,
            image,
        } => {
            let args = AddArgs {
                name,
                plant_type,
                every,
                sunlight,
                last_watered,
                image,
            };
            commands::plant::add(&mut store, args, &output)
        }
        Commands::List { plant_type, sort } => {
            let sort = sort.unwrap_or(config.default_sort);
            commands::plant::list(&store, plant_type, sort, &output)
        }
        Commands::Show { id } => commands::plant::show(&store, id, &output),
        Commands::Water { id } => commands::plant::water(&mut store, id, &output),
        Commands::Remove { id, yes } => commands::plant::remove(&mut store, id, yes, &output),
        Commands::Due => commands::plant::due(&store, &output),
        Commands::Types => commands::plant::types(&store, &output),
        Commands::Export { output: dest } => commands::transfer::export(&store, dest, &output),
        Commands::Import { file } => commands::transfer::import(&mut store, file, &output),
        Commands::Theme { action } => {
            commands::theme::run(&mut store, action.unwrap_or(ThemeAction::Show), &output)
        }
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Level requested through PLANTPAL_LOG, if any
fn log_level() -> Option<String> {
    std::env::var("PLANTPAL_LOG")
        .ok()
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty())
}

/// Initialize file-based logging
///
/// Only initializes if PLANTPAL_LOG is set; its value is the level.
fn init_logging(config: &Config) {
    let Some(log_level) = log_level() else {
        return;
    };
    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_file = match File::options().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "plantpal_core={},plantpal={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from(["plantpal", "ls", "--type", "fern", "--sort", "name"]).unwrap();
        match cli.command {
            Commands::List { plant_type, sort } => {
                assert_eq!(plant_type, TypeFilter::Type("fern".into()));
                assert_eq!(sort, Some(SortMode::Name));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_add_with_date() {
        let cli = Cli::try_parse_from([
            "plantpal", "add", "Monty", "-t", "monstera", "-e", "10", "-w", "2024-01-01",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                name,
                every,
                last_watered,
                ..
            } => {
                assert_eq!(name, "Monty");
                assert_eq!(every, Some(10));
                assert_eq!(last_watered, NaiveDate::from_ymd_opt(2024, 1, 1));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_logging_requires_env_level() {
        std::env::remove_var("PLANTPAL_LOG");
        assert_eq!(log_level(), None);

        std::env::set_var("PLANTPAL_LOG", " ");
        assert_eq!(log_level(), None);

        std::env::set_var("PLANTPAL_LOG", "debug");
        assert_eq!(log_level().as_deref(), Some("debug"));
        std::env::remove_var("PLANTPAL_LOG");
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Cli::try_parse_from(["plantpal", "add", "Monty", "-w", "yesterday"]).is_err());
    }
}
