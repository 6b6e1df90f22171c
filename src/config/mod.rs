mod server;
mod settings;

pub use server::{ServerConfig, default_config_dir};
pub use settings::{ENCRYPTED_PREFIX, SETTINGS_FILE_NAME, Settings, SettingsStore};
