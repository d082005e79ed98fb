use std::net::SocketAddr;
use std::sync::Arc;

use innvo_api::config::{ServerConfig, StoreBackend};
use innvo_api::router::build_app_router;
use innvo_api::service::AssetService;
use innvo_api::state::{build_job_trigger, AppState};
use innvo_db::store::{AssetStore, InMemoryAssetStore, PgAssetStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innvo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Asset store ---
    let store: Arc<dyn AssetStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = innvo_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            innvo_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            innvo_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgAssetStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory asset store; data is lost on restart");
            Arc::new(InMemoryAssetStore::new())
        }
    };

    // --- Job trigger ---
    let jobs = match &config.jobs {
        Some(job_config) => {
            let trigger = build_job_trigger(job_config).await;
            tracing::info!(
                job = %trigger.job(),
                runner = %job_config.runner_program,
                timeout_secs = job_config.timeout_secs,
                "Job trigger configured",
            );
            Some(Arc::new(trigger))
        }
        None => {
            tracing::info!("JOB_BUCKET/JOB_KEY not set, /api/runJob disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        assets: AssetService::new(store),
        jobs,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
