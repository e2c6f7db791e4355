use cache_router::config::Config;
use cache_router::management;
use cache_router::membership::registry::MembershipRegistry;
use cache_router::metrics::ProxyMetrics;
use cache_router::proxy::{self, CacheProxy, HttpForwarder, MeteredForwarder};
use cache_router::routing::Router;

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

const STATS_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    // 1. Membership, seeded from the command line:
    let registry = MembershipRegistry::with_members(config.vnodes, config.seed_backends());

    // 2. Data plane:
    let metrics = ProxyMetrics::new();
    let router = Router::new(registry.clone(), config.replicas);
    let forwarder = MeteredForwarder::new(HttpForwarder::new()?, metrics.clone());
    let cache_proxy = CacheProxy::new(router, forwarder);

    // 3. Management service:
    let manager_app = management::app(registry.clone(), metrics.clone());
    let manager_listener = tokio::net::TcpListener::bind(config.manager_addr()).await?;
    tracing::info!("Starting proxy manager service on {}", config.manager_addr());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(manager_listener, manager_app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            tracing::error!("Manager service stopped: {}", e);
        }
    });

    // 4. Stats reporter:
    let stats_registry = registry.clone();
    let stats_metrics = metrics.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATS_INTERVAL);

        loop {
            interval.tick().await;
            tracing::debug!(
                "Members: [{}] requests={} hits={} misses={}",
                stats_registry.list_joined(),
                stats_metrics.requests.count(),
                stats_metrics.hits.count(),
                stats_metrics.misses.count()
            );
        }
    });

    // 5. Proxy service:
    let proxy_listener = tokio::net::TcpListener::bind(config.proxy_addr()).await?;
    tracing::info!(
        "Starting proxy service on {} ({} replicas, {} members)",
        config.proxy_addr(),
        cache_proxy.router().replicas(),
        registry.len()
    );

    let proxy_app = proxy::app(cache_proxy).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(proxy_listener, proxy_app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Proxy service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
