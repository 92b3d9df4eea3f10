mod analytics;
mod config;
mod errors;
mod page;
mod session;
mod state;
mod storage;

use anyhow::Result;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::DirectoryDownloads;
use crate::config::Config;
use crate::session::run_session;
use crate::state::PageController;
use crate::storage::FileStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging; stdout carries the page output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting CV page v{}", env!("CARGO_PKG_VERSION"));

    let store = FileStore::open(&config.storage_path);
    info!("Storage at {}", store.path().display());

    let pdf_present = config.pdf_path.exists();
    if !pdf_present {
        warn!("CV PDF not found at {}", config.pdf_path.display());
    }

    let mut downloads = DirectoryDownloads::new(&config.download_dir);
    let mut page = PageController::new(config, store);

    run_session(
        &mut page,
        &mut downloads,
        BufReader::new(stdin()),
        stdout(),
        pdf_present,
    )
    .await?;

    Ok(())
}
