//! Kharcha main entry point

use clap::Parser;
use kharcha_api::start_server;
use kharcha_config::{Config, StorageBackend};
use kharcha_core::Book;
use kharcha_store::{JsonFileStore, MemoryStore, RemoteBlobStore, StoreRef};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "kharcha")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight, self-hosted credit/debit tracker", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = if args.config.exists() {
            Config::load(args.config.clone())?
        } else {
            log::warn!(
                "Config file not found: {}, using defaults",
                args.config.display()
            );
            Config::default()
        };

        let store: StoreRef = match config.storage.backend {
            StorageBackend::File => {
                log::info!("Using file store: {}", config.blob_path().display());
                Arc::new(JsonFileStore::new(config.blob_path()))
            }
            StorageBackend::Remote => {
                // validate() guarantees the URL is present for this backend
                let url = config.storage.remote_url.clone().unwrap_or_default();
                log::info!("Using remote blob store: {}", url);
                Arc::new(RemoteBlobStore::new(
                    url,
                    config.storage.request_timeout_secs,
                )?)
            }
            StorageBackend::Memory => {
                log::info!("Using in-memory store (data will not persist)");
                Arc::new(MemoryStore::default())
            }
        };

        let book = Arc::new(RwLock::new(Book::new(config.clone(), store)));

        {
            let book_guard = book.write().await;
            match book_guard.load().await {
                Ok(count) => log::info!("Loaded {} transactions", count),
                Err(e) => log::warn!("Failed to load transactions: {}", e),
            }
        }

        start_server(config, book).await;
        Ok(())
    })
}
