use cache_router::node::{self, HitRatio};

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Toy cache backend for trying the router locally.
#[derive(Parser, Debug)]
#[command(name = "cache_node")]
struct Args {
    /// Port to listen on
    port: u16,

    /// Fraction of requests answered with `X-Cache: HIT`
    #[arg(long, default_value_t = 0.5)]
    hit_ratio: f64,

    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let addr = SocketAddr::new(args.bind, args.port);

    tracing::info!("Cache node listening on {} (hit ratio {})", addr, args.hit_ratio);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, node::app(HitRatio::new(args.hit_ratio))).await?;

    Ok(())
}
