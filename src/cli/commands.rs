use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Location of the settings file, shared by every `config` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConfigDirArg {
    /// Directory holding config.json (defaults to the user config directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings with the password masked
    Show {
        #[command(flatten)]
        dir: ConfigDirArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update one or more settings and save them
    Set {
        #[command(flatten)]
        dir: ConfigDirArg,

        /// Database server
        #[arg(long)]
        server: Option<String>,

        /// Database name
        #[arg(long)]
        database: Option<String>,

        /// Database username
        #[arg(long)]
        username: Option<String>,

        /// Database password
        #[arg(long, conflicts_with = "prompt_password")]
        password: Option<String>,

        /// Prompt for the database password instead of passing it on the command line
        #[arg(long)]
        prompt_password: bool,
    },

    /// Print the path of the settings file
    Path {
        #[command(flatten)]
        dir: ConfigDirArg,
    },
}
