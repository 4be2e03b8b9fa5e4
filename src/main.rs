use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kosync::auth::{Credentials, PasswordHasher};
use kosync::config::ServerConfig;
use kosync::error::Error;
use kosync::server::{AppState, create_router};
use kosync::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "kosync")]
#[command(about = "A reading progress sync server for KOReader devices", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML configuration file. Environment variables override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for the database
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Register an account without going through the HTTP API
    CreateUser {
        #[command(flatten)]
        config: ConfigArgs,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
}

fn init_tracing(format: LogFormat) {
    // RUST_LOG wins; LOG_LEVEL only sets the level for this crate.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(format!("kosync={level}"))
    });

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<ServerConfig> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if config.uses_default_salt() {
        warn!("PASSWORD_SALT is not set; using the built-in default. Set it before registering users.");
    }
    Ok(config)
}

#[cfg(unix)]
fn set_restrictive_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(&config.data_dir)?;

    let db_path = config.db_path();
    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    #[cfg(unix)]
    set_restrictive_permissions(&db_path);

    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => warn!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down");
}

async fn run_serve(
    config_args: ConfigArgs,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let mut config = load_config(&config_args)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let store = open_store(&config)?;
    info!("Database ready at {}", config.db_path().display());

    let hasher = PasswordHasher::new(config.password_salt.clone())?;
    let state = Arc::new(AppState::new(Arc::new(store), hasher)?);

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn run_create_user(config_args: ConfigArgs, username: String, password: String) -> anyhow::Result<()> {
    let config = load_config(&config_args)?;
    let store = open_store(&config)?;
    let hasher = PasswordHasher::new(config.password_salt)?;
    let credentials = Credentials::new(Arc::new(store), hasher)?;

    match credentials.register(&username, &password) {
        Ok(id) => {
            println!("Created user '{username}' (id {id})");
            Ok(())
        }
        Err(Error::AlreadyExists) => bail!("username already exists: {username}"),
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Commands::Serve { config, host, port } => run_serve(config, host, port).await?,
        Commands::Admin { command } => match command {
            AdminCommands::CreateUser {
                config,
                username,
                password,
            } => run_create_user(config, username, password)?,
        },
    }

    Ok(())
}
