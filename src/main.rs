//! Product Cache - product catalog service with a cache-aside distributed cache
//!
//! Serves CRUD operations over products held in a relational store, with a
//! distributed cache in front of reads.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::create_router;
use product_cache::cache::{CacheStore, DistributedCache, MemoryCache};
use product_cache::store::{InMemoryProductRepository, ProductRepository};
use product_cache::{spawn_cleanup_task, AppState, Config, ProductCatalog};

/// Main entry point for the product catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache and store backends
/// 4. Start the cache cleanup task when the in-memory cache is used
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting product catalog server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, sliding_expiration={}s, instance_name={:?}, redis={}, database={}",
        config.server_port,
        config.sliding_expiration,
        config.cache_instance_name,
        config.redis_url.is_some(),
        config.database_url.is_some()
    );

    let (cache, cleanup_handle) = build_cache(&config).await?;
    let repository = build_repository(&config).await?;

    let catalog =
        ProductCatalog::new(cache, repository).with_sliding_expiration(config.sliding_window());
    let app = create_router(AppState::new(catalog));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connects the distributed cache.
///
/// Falls back to the in-memory cache, with its cleanup task, when no Redis
/// endpoint is configured.
async fn build_cache(
    config: &Config,
) -> anyhow::Result<(Arc<dyn DistributedCache>, Option<JoinHandle<()>>)> {
    #[cfg(feature = "redis")]
    if let Some(url) = &config.redis_url {
        let instance_name = config.cache_instance_name.clone();
        let cache = product_cache::cache::RedisCache::connect(url, instance_name)
            .await
            .context("failed to connect to Redis")?;
        info!("Using Redis cache");
        return Ok((Arc::new(cache), None));
    }

    #[cfg(not(feature = "redis"))]
    if config.redis_url.is_some() {
        warn!("REDIS_URL is set but Redis support is not compiled in; using the in-memory cache");
    }

    let cache = MemoryCache::new(CacheStore::new(config.max_entries))
        .with_instance_name(config.cache_instance_name.clone());
    let cleanup_handle = spawn_cleanup_task(cache.store(), config.cleanup_interval);
    info!("Using in-memory cache with {} entries max", config.max_entries);

    Ok((Arc::new(cache), Some(cleanup_handle)))
}

/// Connects the product store.
///
/// Falls back to an empty in-memory store when no database is configured.
async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn ProductRepository>> {
    #[cfg(feature = "postgres")]
    if let Some(url) = &config.database_url {
        let repository = product_cache::store::PgProductRepository::connect(url, 10)
            .await
            .context("failed to connect to PostgreSQL")?;
        return Ok(Arc::new(repository));
    }

    #[cfg(not(feature = "postgres"))]
    if config.database_url.is_some() {
        warn!("DATABASE_URL is set but PostgreSQL support is not compiled in");
    }

    warn!("Serving an empty in-memory product store");
    Ok(Arc::new(InMemoryProductRepository::new()))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
