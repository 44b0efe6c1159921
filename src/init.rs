use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use dialoguer::{Confirm, Input};
use docent_kb::{Settings, SqliteStore};

use crate::config::Config;

/// Answers collected by the wizard before anything is written.
struct WizardState {
    app_name: String,
    welcome_message: String,
    contact_email: String,
    map_link: String,
    db_path: String,
}

/// `docent init`: prompt for the assistant identity and database location,
/// write the config file, and save the initial settings record.
pub(crate) async fn run(output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    println!("docent init — setup wizard\n");

    let defaults = Settings::default();
    let app_name: String = Input::new()
        .with_prompt("Assistant name")
        .default(defaults.app_name.clone())
        .interact_text()?;
    let welcome_message: String = Input::new()
        .with_prompt("Welcome message")
        .default(defaults.welcome_message.clone())
        .interact_text()?;
    let contact_email: String = Input::new()
        .with_prompt("Contact email for fallback replies")
        .default(defaults.contact_email.clone())
        .interact_text()?;
    let map_link: String = Input::new()
        .with_prompt("Map link for location questions (empty to skip)")
        .allow_empty(true)
        .default(String::new())
        .interact_text()?;
    let db_path: String = Input::new()
        .with_prompt("Database path")
        .default(config.database.path.clone())
        .interact_text()?;

    let state = WizardState {
        app_name,
        welcome_message,
        contact_email,
        map_link,
        db_path,
    };
    let config_path = output.unwrap_or_else(|| PathBuf::from("docent.toml"));

    println!("\nAbout to write:");
    println!("  config:   {}", config_path.display());
    println!("  database: {}", state.db_path);
    println!("  contact:  {}", state.contact_email);
    if !Confirm::new()
        .with_prompt("Proceed?")
        .default(true)
        .interact()?
    {
        println!("aborted, nothing written");
        return Ok(());
    }

    write_config(&config_path, config, &state)?;
    save_settings(&state).await?;

    println!("\nsetup complete — run `docent seed` to load the starter FAQ");
    Ok(())
}

fn write_config(path: &Path, base: &Config, state: &WizardState) -> anyhow::Result<()> {
    let mut config = base.clone();
    config.database.path = state.db_path.clone();
    let serialized = toml::to_string_pretty(&config).context("failed to serialize config")?;
    std::fs::write(path, serialized)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

async fn save_settings(state: &WizardState) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(&state.db_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let store = SqliteStore::new(&state.db_path)
        .await
        .with_context(|| format!("failed to open knowledge base at {}", state.db_path))?;
    store
        .save_settings(&Settings {
            app_name: state.app_name.clone(),
            welcome_message: state.welcome_message.clone(),
            map_link: state.map_link.clone(),
            contact_email: state.contact_email.clone(),
            icon_url: String::new(),
            updated_at: Utc::now(),
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(dir: &Path) -> WizardState {
        WizardState {
            app_name: "Class of '81 Assistant".to_owned(),
            welcome_message: "Ask away!".to_owned(),
            contact_email: "organizers@example.com".to_owned(),
            map_link: "https://maps.example.com/campus".to_owned(),
            db_path: dir.join("data/docent.db").display().to_string(),
        }
    }

    #[test]
    fn write_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docent.toml");
        write_config(&path, &Config::default(), &state(dir.path())).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();
        assert!(loaded.database.path.ends_with("data/docent.db"));
    }

    #[tokio::test]
    async fn save_settings_creates_database_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path());
        save_settings(&state).await.unwrap();

        let store = SqliteStore::new(&state.db_path).await.unwrap();
        let settings = store.fetch_settings().await.unwrap();
        assert_eq!(settings.app_name, "Class of '81 Assistant");
        assert_eq!(settings.map_link, "https://maps.example.com/campus");
    }
}
