use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certified_payroll::api::{AppState, build_cors_layer, create_router};
use certified_payroll::config::{ConfigLoader, ServerConfig, StorageBackend};
use certified_payroll::error::PayrollError;
use certified_payroll::service::PayrollService;
use certified_payroll::store::{DocumentStore, FileStore, MemoryStore, PayrollRepository};

const DEFAULT_CONFIG_DIR: &str = "./config";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certified_payroll=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = std::env::var("PAYROLL_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
    let config = ConfigLoader::load_or_default(&config_dir)?
        .with_overrides(|key| std::env::var(key).ok())?
        .into_config();
    info!(
        config_dir = %config_dir.display(),
        host = %config.host,
        port = config.port,
        backend = ?config.storage.backend,
        "Loaded server configuration"
    );

    let store = open_store(&config).await?;
    let state = AppState::new(PayrollService::new(PayrollRepository::new(store)));
    let app = create_router(state).layer(build_cors_layer(&config)?);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "Certified payroll API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn open_store(config: &ServerConfig) -> Result<Arc<dyn DocumentStore>, PayrollError> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::File => {
            let dir = config
                .storage
                .data_dir
                .clone()
                .ok_or_else(|| PayrollError::InvalidConfig {
                    field: "storage.data_dir".to_string(),
                    message: "required when storage.backend is 'file'".to_string(),
                })?;
            let store = FileStore::open(dir).await?;
            info!(data_dir = %store.dir().display(), "Opened file store");
            Ok(Arc::new(store))
        }
    }
}

/// Waits for Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
