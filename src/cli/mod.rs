mod commands;
mod settings;

pub use commands::{ConfigCommands, ConfigDirArg};
pub use settings::{
    SettingsUpdate, open_settings_store, run_config_path, run_config_set, run_config_show,
};
