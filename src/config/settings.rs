use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::{self, MasterKey};
use crate::error::{Error, Result};

/// Marks a sensitive field that was written encrypted.
pub const ENCRYPTED_PREFIX: &str = "enc:";

pub const SETTINGS_FILE_NAME: &str = "config.json";

const DEFAULT_SERVER: &str = "data";
const DEFAULT_DATABASE: &str = "reporting";

/// Database connection settings edited from the settings page.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Settings {
    /// Both credentials are required before a connection is attempted.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Reads and writes [`Settings`] at a fixed path, encrypting the credentials
/// when a master key is available.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    key: Option<MasterKey>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: Option<MasterKey>) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn encryption_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Loads settings. A missing file yields defaults.
    pub fn load(&self) -> Result<Settings> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let stored: Settings =
            serde_json::from_str(&data).map_err(|e| Error::ConfigParse(e.to_string()))?;

        let mut settings = Settings::default();
        if !stored.server.is_empty() {
            settings.server = stored.server;
        }
        if !stored.database.is_empty() {
            settings.database = stored.database;
        }
        settings.username = self.reveal("username", &stored.username)?;
        settings.password = self.reveal("password", &stored.password)?;

        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            create_private_dir(parent)?;
        }

        let stored = Settings {
            server: settings.server.clone(),
            database: settings.database.clone(),
            username: self.conceal(&settings.username)?,
            password: self.conceal(&settings.password)?,
        };

        let data = serde_json::to_string_pretty(&stored)
            .map_err(|e| Error::Config(format!("failed to serialize settings: {e}")))?;
        let mut file = open_private_file(&self.path)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }

    fn reveal(&self, field: &str, value: &str) -> Result<String> {
        let Some(envelope) = value.strip_prefix(ENCRYPTED_PREFIX) else {
            return Ok(value.to_string());
        };

        match &self.key {
            Some(key) => crypto::decrypt(envelope, key.as_bytes()),
            None => {
                tracing::warn!("Stored {field} is encrypted but no master key is set; ignoring it");
                Ok(String::new())
            }
        }
    }

    fn conceal(&self, value: &str) -> Result<String> {
        match &self.key {
            Some(key) if !value.is_empty() => Ok(format!(
                "{ENCRYPTED_PREFIX}{}",
                crypto::encrypt(value, key.as_bytes())?
            )),
            _ => Ok(value.to_string()),
        }
    }
}

/// Opens `path` for writing with owner-only permissions from creation on.
fn open_private_file(path: &Path) -> Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let file = options.open(path)?;
        // An existing file keeps its old mode through open().
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        Ok(file)
    }
    #[cfg(not(unix))]
    {
        Ok(options.open(path)?)
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(dir)?;
    }
    #[cfg(not(unix))]
    fs::create_dir_all(dir)?;
    Ok(())
}
