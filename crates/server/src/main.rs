use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use drivenest_blob::{BlobConfig, BlobStore};
use drivenest_server::api::{self, AppState};
use drivenest_server::config::DriveNestConfig;
use drivenest_server::notify::SubscriberRegistry;
use drivenest_store::ThumbnailStore;

/// DriveNest cloud storage HTTP server.
#[derive(Parser, Debug)]
#[command(name = "drivenest-server", about = "Cloud storage API for DriveNest")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "drivenest.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration from the TOML file, or use defaults if the file
    // does not exist. Environment variables override either source.
    let mut config: DriveNestConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        info!(path = %cli.config, "config file not found, using defaults");
        toml::from_str("")?
    };
    config.apply_env_overrides();

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let public_url = config.public_url();

    let store = Arc::new(ThumbnailStore::new(config.store.clone()).await?);
    info!(url = %config.store.url, "metadata store initialized");

    let media_root = PathBuf::from(&config.media.root);
    let blobs = Arc::new(BlobStore::new(BlobConfig {
        root: media_root.clone(),
        public_url,
        url_prefix: config.media.url_prefix.clone(),
    })?);
    info!(root = %media_root.display(), "blob store initialized");

    let state = AppState {
        store,
        blobs,
        registry: Arc::new(SubscriberRegistry::new()),
        media_root,
        allowed_origins: config.cors.allowed_origins.clone(),
        max_upload_bytes: config.upload.max_bytes,
    };
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "drivenest-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("drivenest-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
