//! CLI command implementations
//!
//! Configuration loading, the serve loop, and grid seeding. This is the
//! only layer that knows about files, sockets and process lifetime; the
//! request handling lives in `rest_api` and the storage in `persistence`.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::hex::Grid;
use crate::persistence::{LocationStore, MongoStore, StoreError};
use crate::rest_api::LocServer;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// MongoDB connection string
    #[serde(default = "default_mongo_url")]
    pub mongo_url: String,

    /// Database holding the location collections
    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// Collection the HTTP surface operates on
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Bound on backend connection attempts, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3210".to_string()
}
fn default_mongo_url() -> String {
    "mongodb://localhost:27017".to_string()
}
fn default_db_name() -> String {
    "defaultDB".to_string()
}
fn default_collection() -> String {
    "locations".to_string()
}
fn default_connect_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            mongo_url: default_mongo_url(),
            db_name: default_db_name(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from file. A missing file yields the defaults;
    /// a present but unreadable or invalid file is an error.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read {}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(CliError::Config(format!(
                "listen_addr is not a host:port address: '{}'",
                self.listen_addr
            )));
        }
        if self.mongo_url.is_empty() {
            return Err(CliError::Config("mongo_url must not be empty".to_string()));
        }
        if self.collection.is_empty() {
            return Err(CliError::Config("collection must not be empty".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CliError::Config(
                "connect_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Connection timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Main CLI entry point
///
/// Parses arguments, installs the log subscriber, and dispatches to the
/// appropriate command. This is the only function that main.rs should call.
pub async fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse_args();
    run_command(cli.command).await
}

/// Run the appropriate command based on CLI args
pub async fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(&config).await,
        Command::Seed {
            config,
            x_size,
            y_size,
        } => seed(&config, x_size, y_size).await,
    }
}

/// Start the HTTP server against the configured MongoDB backend.
///
/// An unreachable backend does not stop the boot: the store reconnects on
/// the next request, and until then requests answer with the unavailable
/// outcome.
pub async fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = MongoStore::new(
        &config.mongo_url,
        &config.db_name,
        Some(config.connect_timeout()),
    );

    if let Err(err) = store.connect().await {
        tracing::warn!("backend not reachable at boot: {}", err);
    }

    let router = LocServer::new(store, &config.collection).router();
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("serving locations on {}", config.listen_addr);
    axum::serve(listener, router).await?;
    Ok(())
}

/// Build a grid and insert every location into the configured collection.
pub async fn seed(config_path: &Path, x_size: i64, y_size: i64) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = MongoStore::new(
        &config.mongo_url,
        &config.db_name,
        Some(config.connect_timeout()),
    );

    let grid = Grid::build(x_size, y_size);
    let (inserted, duplicates) = seed_grid(&store, &config.collection, &grid).await?;
    info!(
        "seeded {} locations into {} ({} already present, x {}..{} y {}..{} z {}..{})",
        inserted,
        config.collection,
        duplicates,
        grid.x_min(),
        grid.x_max(),
        grid.y_min(),
        grid.y_max(),
        grid.z_min(),
        grid.z_max()
    );
    Ok(())
}

/// Insert every grid location, returning (inserted, duplicates). A cell
/// already present is counted, not treated as a failure; any other store
/// error aborts the run.
async fn seed_grid<S: LocationStore>(
    store: &S,
    collection: &str,
    grid: &Grid,
) -> CliResult<(usize, usize)> {
    let mut inserted = 0usize;
    let mut duplicates = 0usize;
    for loc in grid.iter() {
        match store.insert(collection, loc).await {
            Ok(()) => {
                debug!("seeded {}", loc.id());
                inserted += 1;
            }
            Err(StoreError::DuplicateKey(_)) => duplicates += 1,
            Err(err) => return Err(err.into()),
        }
    }
    Ok((inserted, duplicates))
}
