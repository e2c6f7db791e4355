use crate::membership::types::Backend;
use crate::ring::DEFAULT_VIRTUAL_NODES;
use crate::routing::DEFAULT_REPLICAS;

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Command-line configuration for the router binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "cache_router")]
#[command(about = "Consistent-hash HTTP router for cache nodes")]
#[command(version)]
pub struct Config {
    /// Port of the management (membership/metrics) service
    #[arg(short = 'm', long, default_value_t = 9190)]
    pub manager_port: u16,

    /// Port of the proxy service
    #[arg(short = 'p', long, default_value_t = 9090)]
    pub proxy_port: u16,

    /// Number of backends selected per request (primary plus alternates)
    #[arg(short = 'r', long, default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Ring positions per backend
    #[arg(long, default_value_t = DEFAULT_VIRTUAL_NODES)]
    pub vnodes: usize,

    /// Address both listeners bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Log routing and membership activity to the console
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Initial cache backends (host:port)
    #[arg(value_name = "BACKENDS")]
    pub backends: Vec<String>,
}

impl Config {
    pub fn proxy_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.proxy_port)
    }

    pub fn manager_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.manager_port)
    }

    pub fn seed_backends(&self) -> Vec<Backend> {
        self.backends
            .iter()
            .map(|addr| addr.trim())
            .filter(|addr| !addr.is_empty())
            .map(Backend::from)
            .collect()
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
