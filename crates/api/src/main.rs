//! Menu manager server entry point.

use std::sync::Arc;

use api::AppState;
use api::config::Config;
use store::{SqliteCatalogStore, SqliteInventoryStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // One database handle, shared by both stores
    let pool = store::sqlite::connect(&config.database_url)
        .await
        .expect("failed to open database");
    let catalog = SqliteCatalogStore::open(pool.clone())
        .await
        .expect("failed to prepare menu_items table");
    let inventory = SqliteInventoryStore::open(pool.clone())
        .await
        .expect("failed to prepare inventory table");
    tracing::info!(database = %config.database_url, "database ready");

    let state = Arc::new(
        AppState::new(catalog, inventory, config.categories.clone())
            .with_order_limit(config.max_open_orders),
    );
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting menu manager");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    pool.close().await;
    tracing::info!("server shut down gracefully");
}
