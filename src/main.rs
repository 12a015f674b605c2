//! Front Desk Operations Service
//!
//! Reservation lifecycle and room-inventory engine for a hotel property.
//! Reads configuration from TOML file (~/.config/frontdesk/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};

use frontdesk::application::services::RoomInventoryIndex;
use frontdesk::config::AppConfig;
use frontdesk::domain::RepositoryProvider;
use frontdesk::support::shutdown::ShutdownCoordinator;
use frontdesk::{
    create_api_router, default_config_path, BillingLedger, FrontDeskService, InMemoryRepositories,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FRONTDESK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Front Desk Operations Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = if app_cfg.storage.seed_demo_data {
        info!("Seeding in-memory store with demo property");
        Arc::new(InMemoryRepositories::with_demo_data())
    } else {
        Arc::new(InMemoryRepositories::new())
    };

    // ── Inventory index (rebuilt from stored reservations) ─────
    let inventory = RoomInventoryIndex::shared();
    let reservations = repos.reservations().find_all().await?;
    inventory.load(&reservations);
    info!(
        claims = inventory.claim_count(),
        "Room inventory index loaded"
    );

    // ── Services ───────────────────────────────────────────────
    let billing = Arc::new(BillingLedger::new(repos.clone()));
    let front_desk = Arc::new(FrontDeskService::new(
        repos.clone(),
        inventory.clone(),
        billing.clone(),
    ));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Create REST API router
    let api_router = create_api_router(
        repos,
        front_desk,
        billing,
        inventory,
        prometheus_handle,
    );

    // Start REST API server with graceful shutdown
    let api_addr = app_cfg.api_address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let mut api_task = tokio::spawn(async move { api_server.await });

    tokio::select! {
        result = &mut api_task => match result {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => {
                error!("REST API server error: {}", e);
                return Err(e.into());
            }
            Err(e) => {
                error!("REST API server task failed: {}", e);
                return Err(e.into());
            }
        },
        _ = shutdown.wait_for_shutdown() => {
            // In-flight requests get `shutdown_timeout` seconds to drain
            match tokio::time::timeout(
                std::time::Duration::from_secs(app_cfg.server.shutdown_timeout),
                &mut api_task,
            )
            .await
            {
                Ok(Ok(Ok(()))) => info!("✅ Graceful shutdown completed"),
                Ok(Ok(Err(e))) => error!("REST API server error during shutdown: {}", e),
                Ok(Err(e)) => error!("REST API server task failed: {}", e),
                Err(_) => warn!(
                    "⚠️ Graceful shutdown timed out after {}s",
                    app_cfg.server.shutdown_timeout
                ),
            }
        }
    }

    info!("👋 Front Desk Operations Service shutdown complete");
    Ok(())
}
