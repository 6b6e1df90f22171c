use std::path::PathBuf;

use serde::Serialize;

use crate::config::{SETTINGS_FILE_NAME, Settings, SettingsStore, default_config_dir};
use crate::crypto::{MASTER_KEY_ENV, MasterKey};

use super::ConfigDirArg;

const MASKED: &str = "********";

#[derive(Serialize)]
struct SettingsOutput<'a> {
    path: String,
    server: &'a str,
    database: &'a str,
    username: &'a str,
    password: &'a str,
    encrypted: bool,
}

/// Settings changes requested on the command line. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub server: Option<String>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        self.server.is_none()
            && self.database.is_none()
            && self.username.is_none()
            && self.password.is_none()
    }

    fn apply(self, settings: &mut Settings) {
        if let Some(server) = self.server {
            settings.server = server;
        }
        if let Some(database) = self.database {
            settings.database = database;
        }
        if let Some(username) = self.username {
            settings.username = username;
        }
        if let Some(password) = self.password {
            settings.password = password;
        }
    }
}

fn settings_path(dir: &ConfigDirArg) -> PathBuf {
    dir.config_dir
        .clone()
        .unwrap_or_else(default_config_dir)
        .join(SETTINGS_FILE_NAME)
}

/// Opens the settings file for `dir`, using the master key from the environment.
pub fn open_settings_store(dir: &ConfigDirArg) -> SettingsStore {
    SettingsStore::new(settings_path(dir), MasterKey::from_env(MASTER_KEY_ENV))
}

pub fn run_config_show(dir: ConfigDirArg, json: bool) -> anyhow::Result<()> {
    let store = open_settings_store(&dir);
    let settings = store.load()?;
    let password = if settings.password.is_empty() { "" } else { MASKED };

    if json {
        let output = SettingsOutput {
            path: store.path().display().to_string(),
            server: &settings.server,
            database: &settings.database,
            username: &settings.username,
            password,
            encrypted: store.encryption_enabled(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("accessdesk settings");
        println!("{}", "─".repeat(19));
        println!("File:        {}", store.path().display());
        println!("Server:      {}", settings.server);
        println!("Database:    {}", settings.database);
        println!("Username:    {}", settings.username);
        println!("Password:    {password}");
        println!(
            "Encryption:  {}",
            if store.encryption_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!();
    }

    Ok(())
}

pub fn run_config_set(
    dir: ConfigDirArg,
    mut update: SettingsUpdate,
    prompt_password: bool,
) -> anyhow::Result<()> {
    if prompt_password {
        let password = inquire::Password::new("Database password:")
            .without_confirmation()
            .prompt()?;
        update.password = Some(password);
    }

    if update.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of --server, --database, --username, --password."
        );
    }

    let store = open_settings_store(&dir);
    let mut settings = store.load()?;
    update.apply(&mut settings);
    store.save(&settings)?;

    println!("Saved settings to {}", store.path().display());
    if !store.encryption_enabled() && settings.has_credentials() {
        println!("Credentials stored in plain text. Set {MASTER_KEY_ENV} to encrypt them.");
    }

    Ok(())
}

pub fn run_config_path(dir: ConfigDirArg) -> anyhow::Result<()> {
    println!("{}", settings_path(&dir).display());
    Ok(())
}
