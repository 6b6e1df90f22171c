use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use accessdesk::auth::{ADMIN_PASSWORD_ENV, AdminPassword};
use accessdesk::cli::{
    ConfigCommands, SettingsUpdate, run_config_path, run_config_set, run_config_show,
};
use accessdesk::config::{ServerConfig, SettingsStore, default_config_dir};
use accessdesk::crypto::{MASTER_KEY_ENV, MasterKey};
use accessdesk::server::{AppState, create_router};
use accessdesk::store::SqliteConnector;

#[derive(Parser)]
#[command(name = "accessdesk")]
#[command(about = "Grant users access to reporting groups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to (0 picks a free port)
        #[arg(long, short, env = "PORT", default_value = "0")]
        port: u16,

        /// Directory holding config.json (defaults to the user config directory)
        #[arg(long)]
        config_dir: Option<PathBuf>,

        /// Directory served under /static/
        #[arg(long, default_value = "./static")]
        static_dir: PathBuf,

        /// Directory the database server setting is resolved against
        #[arg(long, default_value = ".")]
        data_root: PathBuf,

        /// Deadline in seconds for a single database call
        #[arg(long, default_value = "30")]
        query_timeout_secs: u64,
    },

    /// Inspect or change the stored database settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn log_security_config(settings_store: &SettingsStore, admin_password: &AdminPassword) {
    if settings_store.encryption_enabled() {
        info!("Config encryption: ENABLED ({MASTER_KEY_ENV} set)");
    } else {
        info!("Config encryption: DISABLED (set {MASTER_KEY_ENV} for encryption)");
    }

    if admin_password.is_enabled() {
        info!("Authentication: ENABLED ({ADMIN_PASSWORD_ENV} set)");
    } else {
        info!("Authentication: DISABLED (set {ADMIN_PASSWORD_ENV} to enable)");
    }
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let settings_store = SettingsStore::new(
        config.settings_path(),
        MasterKey::from_env(MASTER_KEY_ENV),
    );
    let admin_password = AdminPassword::from_env();
    log_security_config(&settings_store, &admin_password);

    let settings = settings_store.load()?;
    info!("Loaded settings from {}", settings_store.path().display());

    let connector = Arc::new(SqliteConnector::new(config.data_root.clone()));
    let state = Arc::new(
        AppState::new(settings_store, settings, connector, admin_password)
            .with_static_dir(config.static_dir.clone())
            .with_query_timeout(config.query_timeout),
    );

    if state.reconnect().is_err() {
        info!("Start the application and configure credentials in Settings");
    }

    let app = create_router(state);
    let addr = config.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!("Starting server on {}", local);
    println!("Server running at http://localhost:{}", local.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("accessdesk=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            config_dir,
            static_dir,
            data_root,
            query_timeout_secs,
        } => {
            let config = ServerConfig {
                host,
                port,
                config_dir: config_dir.unwrap_or_else(default_config_dir),
                static_dir,
                data_root,
                query_timeout: Duration::from_secs(query_timeout_secs),
            };
            run_serve(config).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show { dir, json } => run_config_show(dir, json)?,
            ConfigCommands::Set {
                dir,
                server,
                database,
                username,
                password,
                prompt_password,
            } => {
                let update = SettingsUpdate {
                    server,
                    database,
                    username,
                    password,
                };
                run_config_set(dir, update, prompt_password)?;
            }
            ConfigCommands::Path { dir } => run_config_path(dir)?,
        },
    }

    Ok(())
}
