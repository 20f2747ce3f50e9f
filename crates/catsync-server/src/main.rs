mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use catsync_core::AppConfig;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(catsync_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, shop = %config.shopify_shop, "starting catsync-server");

    let pool = connect_database(&config).await;
    match catsync_db::run_migrations(&pool).await {
        Ok(applied) => tracing::info!(applied, "database migrations up to date"),
        Err(e) => tracing::error!(error = %e, "failed to run database migrations"),
    }

    let mut scheduler = scheduler::build_scheduler(pool.clone(), Arc::clone(&config)).await?;

    let app = build_app(AppState { pool: pool.clone() });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!(error = %e, "scheduler did not shut down cleanly");
    }
    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Opens the pool eagerly, falling back to a lazily connecting pool when the
/// database is unreachable so the process can still serve and schedule.
async fn connect_database(config: &AppConfig) -> PgPool {
    let options = catsync_db::connect_options(config);
    let pool_config = catsync_db::PoolConfig::from_app_config(config);

    match catsync_db::connect_pool(options.clone(), pool_config).await {
        Ok(pool) => {
            tracing::info!(host = %config.db_host, db = %config.db_name, "connected to database");
            pool
        }
        Err(e) => {
            tracing::error!(
                host = %config.db_host,
                db = %config.db_name,
                error = %e,
                "database unreachable at startup; queries will fail until it recovers"
            );
            catsync_db::connect_pool_lazy(options, pool_config)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
