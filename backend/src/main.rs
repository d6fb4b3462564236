//! Backend entry-point: wires storage backends, the connectivity probe,
//! and the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, DieselStorage, PoolConfig};
use backend::outbound::{FileStore, StorageAdapter};
use backend::server::{create_server, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env();

    let pool_config =
        PoolConfig::new(config.database_url()).with_connection_timeout(Duration::from_secs(5));
    let relational = DieselStorage::new(DbPool::new(&pool_config));
    let file = FileStore::new(&config.data_dir);
    let adapter = Arc::new(StorageAdapter::new(Some(relational), file));

    // Probe in the background so startup never waits on the database.
    // Requests arriving before the probe finishes use the file backend.
    let probe_adapter = adapter.clone();
    tokio::spawn(async move {
        if probe_adapter.probe().await {
            info!("serving from PostgreSQL");
        } else {
            warn!("serving from file storage; run POST /api/storage/reprobe once the database is up");
        }
    });

    let state = web::Data::new(HttpState::new(adapter));
    info!(port = config.port, "starting HTTP server");
    create_server(&config, state)?.await
}
