//! Theme command handler

use anyhow::Result;

use plantpal_core::{Persistence, PlantStore, Theme};

use crate::output::Output;

/// What `plantpal theme` should do
#[derive(Debug, Clone)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

impl std::str::FromStr for ThemeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toggle" => Ok(ThemeAction::Toggle),
            other => other.parse().map(ThemeAction::Set),
        }
    }
}

/// Show, set or toggle the theme
pub fn run<P: Persistence>(store: &mut PlantStore<P>, action: ThemeAction, output: &Output) -> Result<()> {
    let changed = !matches!(action, ThemeAction::Show);
    let theme = match action {
        ThemeAction::Show => store.theme(),
        ThemeAction::Set(theme) => {
            store.set_theme(theme);
            theme
        }
        ThemeAction::Toggle => store.toggle_theme(),
    };

    if output.is_json() {
        println!("{}", serde_json::json!({ "theme": theme }));
    } else if changed && !output.is_quiet() {
        output.success(&format!("Theme set to {}", theme));
    } else {
        println!("{}", theme);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert!(matches!("toggle".parse::<ThemeAction>(), Ok(ThemeAction::Toggle)));
        assert!(matches!(
            "dark".parse::<ThemeAction>(),
            Ok(ThemeAction::Set(Theme::Dark))
        ));
        assert!("neon".parse::<ThemeAction>().is_err());
    }

    #[test]
    fn test_toggle_persists() {
        use crate::output::OutputFormat;
        use plantpal_core::MemoryPersistence;

        let mut store = PlantStore::load(MemoryPersistence::new());
        let output = Output::new(OutputFormat::Quiet);

        run(&mut store, ThemeAction::Toggle, &output).unwrap();
        assert_eq!(store.theme(), Theme::Dark);

        run(&mut store, ThemeAction::Set(Theme::Light), &output).unwrap();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.backend().raw("plantpal_theme_v1"), Some("light"));
    }
}
