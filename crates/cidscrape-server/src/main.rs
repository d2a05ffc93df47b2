//! cidscrape - fetch CID metadata, store it, serve it

use anyhow::{Context, Result};
use cidscrape_common::logging::{init_logging, LogConfig, LogLevel};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cidscrape_server::{
    api,
    config::Config,
    db, ingest,
    store::{MemoryMetadataStore, PgMetadataStore, SharedStore},
};

#[derive(Parser, Debug)]
#[command(name = "cidscrape")]
#[command(author, version, about = "Fetch token metadata for a list of CIDs and serve it")]
struct Cli {
    /// CID list (first column of each row is the CID)
    #[arg(long, env = "CIDSCRAPE_CID_FILE")]
    cids: Option<String>,

    /// Treat the first row of the CID list as a header
    #[arg(long)]
    has_header: bool,

    /// Gateway base URL; documents are fetched from <gateway>/ipfs/<cid>
    #[arg(long, env = "CIDSCRAPE_GATEWAY_URL")]
    gateway: Option<String>,

    /// Maximum number of concurrent fetches
    #[arg(short, long, env = "CIDSCRAPE_WORKERS")]
    workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, env = "CIDSCRAPE_REQUEST_TIMEOUT")]
    timeout: Option<u64>,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Keep records in memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,

    /// Delete all stored metadata before fetching
    #[arg(long)]
    reset: bool,

    /// Exit after the fetch pipeline instead of serving the read API
    #[arg(long)]
    no_serve: bool,

    #[arg(long, env = "CIDSCRAPE_HOST")]
    host: Option<String>,

    #[arg(long, env = "CIDSCRAPE_PORT")]
    port: Option<u16>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(ref cids) = self.cids {
            config.ingest.cid_file = cids.clone();
        }
        if self.has_header {
            config.ingest.has_header = true;
        }
        if let Some(ref gateway) = self.gateway {
            config.ingest.gateway_url = gateway.clone();
        }
        if let Some(workers) = self.workers {
            config.ingest.workers = workers;
        }
        if let Some(timeout) = self.timeout {
            config.ingest.request_timeout_secs = timeout;
        }
        if let Some(ref url) = self.database_url {
            config.database.url = url.clone();
        }
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Info })
        .log_file_prefix("cidscrape")
        .filter_directives("sqlx=warn,tower_http=info")
        .build()
        .merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    info!(
        gateway = %config.ingest.gateway_url,
        workers = config.ingest.workers,
        cid_file = %config.ingest.cid_file,
        "Configuration loaded"
    );

    let store = open_store(&cli, &config).await?;

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Received Ctrl+C, cancelling fetch pipeline");
                cancel.cancel();
            }
        }
    });

    let report = ingest::run_pipeline(&config.ingest, store.clone(), &cancel).await?;
    ctrl_c.abort();

    for (cid, error) in &report.failures {
        warn!(cid = %cid, error = %error, "CID not stored");
    }

    log_stored(&store).await?;

    if cancel.is_cancelled() {
        info!(skipped = report.skipped, "Run cancelled, not starting the read API");
        return Ok(());
    }

    if cli.no_serve {
        return Ok(());
    }

    api::serve(
        &config.server,
        store,
        api::shutdown_signal(config.server.shutdown_timeout_secs),
    )
    .await
}

async fn open_store(cli: &Cli, config: &Config) -> Result<SharedStore> {
    if cli.in_memory {
        info!("Using in-memory metadata store");
        return Ok(Arc::new(MemoryMetadataStore::new()));
    }

    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    if cli.reset {
        db::reset_metadata(&pool).await.context("Failed to reset metadata")?;
    }

    Ok(Arc::new(PgMetadataStore::new(pool)))
}

async fn log_stored(store: &SharedStore) -> Result<()> {
    let records = store.get_all().await.context("Failed to read stored metadata")?;
    for record in &records {
        info!(
            cid = %record.cid,
            name = %record.name,
            image = %record.image,
            description = %record.description,
            "Stored metadata"
        );
    }
    info!(count = records.len(), "Metadata store contents");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_invalid_env_values() {
        let mut config = Config::default();
        config.ingest.workers = 0;
        assert!(config.validate().is_err());

        let cli = Cli::try_parse_from(["cidscrape", "--workers", "4", "--has-header"]).unwrap();
        cli.apply(&mut config);

        assert!(config.validate().is_ok());
        assert_eq!(config.ingest.workers, 4);
        assert!(config.ingest.has_header);
    }

    #[test]
    fn test_cli_leaves_unset_values_alone() {
        let mut config = Config::default();
        let cli = Cli::try_parse_from(["cidscrape", "--gateway", "http://127.0.0.1:8081/"]).unwrap();
        cli.apply(&mut config);

        assert_eq!(config.ingest.gateway_url, "http://127.0.0.1:8081/");
        assert_eq!(config.server.port, 8080);
        assert!(!config.ingest.has_header);
    }
}
