//! Proxy Module
//!
//! The data plane. Every inbound request is routed to a cache backend and
//! relayed there through a `Forwarder`.
//!
//! ## Request Flow
//! 1. `handlers::handle_proxy` buffers the request and calls `CacheProxy::dispatch`.
//! 2. The `Router` picks a primary and alternates; the alternates replace the
//!    request's `X-Backends` header so the next hop honours this decision.
//! 3. `MeteredForwarder` counts and times the call, then classifies the
//!    backend's `X-Cache` answer as a hit or a miss.
//! 4. `HttpForwarder` performs the actual HTTP exchange.
//!
//! ## Submodules
//! - **`forwarder`**: the `Forwarder` capability and its request/response types.
//! - **`metered`**: metrics decorator over any `Forwarder`.
//! - **`http`**: `reqwest`-backed forwarder.
//! - **`handlers`**: axum handler and app wiring.

pub mod forwarder;
pub mod handlers;
pub mod http;
pub mod metered;

pub use forwarder::{ForwardRequest, ForwardResponse, Forwarder};
pub use handlers::{CacheProxy, app};
pub use http::HttpForwarder;
pub use metered::MeteredForwarder;
