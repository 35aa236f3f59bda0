//! ledgerdb shell - JSON-lines host for the in-memory data provider.
//!
//! Seeds a store from an optional fixture file, then reads one command per
//! line from stdin and writes one reply per line to stdout. Logs go to
//! stderr.

mod config;
mod error;
mod session;

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use ledgerdb_engine::{Clock, DataProvider, Fixtures, Store, SystemClock};
use std::path::Path;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerdb=info,ledgerdb_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let store = match &config.fixtures_path {
        Some(path) => load_store(path).await?,
        None => Store::new(),
    };
    tracing::info!(
        collections = store.collection_names().len(),
        records = store.record_count(),
        "Store ready"
    );

    let session = Session::new(DataProvider::new(store), config.pretty);
    let answered = session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    tracing::info!(answered, "Input closed");
    Ok(())
}

async fn load_store(path: &Path) -> Result<Store> {
    tracing::info!("Loading fixtures from {}", path.display());
    let json = tokio::fs::read_to_string(path).await?;
    let fixtures = Fixtures::from_json(&json)?;
    Ok(Store::from_fixtures(fixtures, &SystemClock.timestamp()))
}
