//! fileshare Server Binary
//!
//! Starts the HTTP gateway for fileshare.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fileshare::web::Server;
use fileshare::{Config, StorageManager};
use tracing_subscriber::{fmt, EnvFilter};

/// fileshare Server
#[derive(Parser, Debug)]
#[command(name = "fileshare-server")]
#[command(about = "Minimal file-sharing service")]
#[command(version)]
struct Args {
    /// Content directory (one blob per upload)
    #[arg(short, long, default_value = "./storage/files")]
    storage_dir: PathBuf,

    /// Metadata document
    #[arg(short = 'M', long, default_value = "./storage/metadata.json")]
    metadata_file: PathBuf,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    listen: String,

    /// Maximum upload size in bytes
    #[arg(short, long, default_value_t = 20 * 1024 * 1024)]
    max_upload_size: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fileshare=debug,tower_http=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("fileshare Server v{}", fileshare::VERSION);
    tracing::info!("Storage directory: {}", args.storage_dir.display());
    tracing::info!("Metadata document: {}", args.metadata_file.display());
    tracing::info!("Max upload size: {} bytes", args.max_upload_size);

    // Build config from args
    let config = Config::builder()
        .storage_dir(&args.storage_dir)
        .metadata_path(&args.metadata_file)
        .listen_addr(&args.listen)
        .max_upload_size(args.max_upload_size)
        .build();

    // Open storage
    let storage = match StorageManager::open(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open storage: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Storage initialized successfully");

    // Start server
    let server = Server::new(config, storage);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
