//! Consistent-Hash Cache Router
//!
//! An HTTP reverse proxy that spreads requests over a pool of cache nodes so
//! that each resource keeps hitting the same node, while nodes can join and
//! leave at runtime.
//!
//! ## Architecture Modules
//! - **`ring`**: the consistent hash ring with virtual nodes.
//! - **`membership`**: the registry that owns the ring and serializes changes to it.
//! - **`routing`**: primary/alternate selection and the `X-Backends` protocol.
//! - **`proxy`**: the data plane; forwards requests and meters every backend call.
//! - **`metrics`**: request, hit, miss and latency instruments.
//! - **`management`**: the administrative HTTP surface.
//! - **`node`**: a toy cache backend for local clusters and tests.
//! - **`config`**: command-line configuration.

pub mod config;
pub mod error;
pub mod management;
pub mod membership;
pub mod metrics;
pub mod node;
pub mod proxy;
pub mod ring;
pub mod routing;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, ForwardError, Result};
pub use membership::registry::MembershipRegistry;
pub use membership::types::Backend;
pub use ring::HashRing;
pub use routing::{Router, Selection};
