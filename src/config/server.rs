use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use super::SETTINGS_FILE_NAME;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the settings file.
    pub config_dir: PathBuf,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
    /// Directory the `server` setting is resolved against.
    pub data_root: PathBuf,
    /// Upper bound for a single database call made on behalf of a request.
    pub query_timeout: Duration,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            config_dir: default_config_dir(),
            static_dir: PathBuf::from("static"),
            data_root: PathBuf::from("."),
            query_timeout: Duration::from_secs(30),
        }
    }
}

/// Per-user configuration directory, falling back to `./config` when the
/// platform has no notion of one.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    ProjectDirs::from("", "", "accessdesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./config"))
}
