//! Management Service
//!
//! Administrative HTTP surface, served on its own port:
//!
//! - `PUT /members/{backend}`: register a backend
//! - `DELETE /members/{backend}`: deregister a backend
//! - `GET /members`: list members
//! - `GET /metrics/`: JSON dump of the proxy metrics
//!
//! Membership endpoints answer with the comma-joined member list as it stands
//! after the call.

pub mod handlers;
pub mod protocol;

use crate::membership::registry::MembershipRegistry;
use crate::metrics::ProxyMetrics;

use axum::Extension;
use axum::routing::{get, put};
use std::sync::Arc;

use handlers::{handle_add_member, handle_list_members, handle_metrics, handle_remove_member};
use protocol::*;

pub fn app(registry: Arc<MembershipRegistry>, metrics: Arc<ProxyMetrics>) -> axum::Router {
    axum::Router::new()
        .route(ENDPOINT_MEMBERS, get(handle_list_members))
        .route(ENDPOINT_MEMBERS_SLASH, get(handle_list_members))
        .route(
            ENDPOINT_MEMBER,
            put(handle_add_member).delete(handle_remove_member),
        )
        .route(ENDPOINT_METRICS, get(handle_metrics))
        .route(ENDPOINT_METRICS_SLASH, get(handle_metrics))
        .layer(Extension(registry))
        .layer(Extension(metrics))
}
