use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seguridad_api::config::{DatabaseConfig, ServerConfig};
use seguridad_api::router::build_app_router;
use seguridad_api::state::AppState;
use seguridad_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "seguridad_api=debug,seguridad_db=info,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let db_config = DatabaseConfig::from_env();
    let addr = config.socket_addr();

    let pool = connect_database(&db_config).await;

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!(%addr, cors_origins = ?config.cors_origins, "Seguridad API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    close_pool(pool, Duration::from_secs(config.shutdown_timeout_secs)).await;
}

/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches to
/// JSON lines for log shipping.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect, verify and migrate. Any failure aborts startup.
async fn connect_database(db_config: &DatabaseConfig) -> DbPool {
    let pool = seguridad_db::create_pool(&db_config.url, db_config.max_connections)
        .await
        .expect("Failed to connect to database");
    seguridad_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    seguridad_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!(max_connections = db_config.max_connections, "Database ready");
    pool
}

async fn close_pool(pool: DbPool, grace: Duration) {
    if tokio::time::timeout(grace, pool.close()).await.is_err() {
        tracing::warn!(grace_secs = grace.as_secs(), "Database pool did not close in time");
    }
    tracing::info!("Shutdown complete");
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
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

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down, draining in-flight requests");
}
