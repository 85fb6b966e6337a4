use std::net::SocketAddr;

use recipe_api::{build_router, AppState};
use recipe_core::repositories::Repositories;
use recipe_infrastructure::{create_pool, memory_repositories, pg_repositories, run_migrations};
use recipe_shared::config::{AppConfig, DatabaseSettings, StorageBackend};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    recipe_shared::telemetry::init_telemetry(config.app.log_format);

    info!(env = %config.app.env, "{} starting...", config.app.name);

    let repos = open_repositories(&config.database).await?;
    let state = AppState::new(config.clone(), repos);
    let app = build_router(state);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn open_repositories(settings: &DatabaseSettings) -> anyhow::Result<Repositories> {
    match settings.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(settings).await?;
            if settings.run_migrations {
                run_migrations(&pool).await?;
                info!("Migrations applied");
            }
            info!("Database connection established");
            Ok(pg_repositories(pool))
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store; data is lost on shutdown");
            Ok(memory_repositories())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
