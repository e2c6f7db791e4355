use crate::membership::registry::MembershipRegistry;
use crate::membership::types::{Backend, join_backends};
use crate::metrics::{MetricsSnapshot, ProxyMetrics};

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
};
use std::sync::Arc;

/// Registers the backend named in the (percent-decoded) path segment, taken
/// verbatim; answers with the updated list.
pub async fn handle_add_member(
    Extension(registry): Extension<Arc<MembershipRegistry>>,
    Path(backend): Path<String>,
) -> (StatusCode, String) {
    let members = registry.add(Backend::new(backend));
    (StatusCode::OK, join_backends(&members))
}

/// Deregisters the backend named in the path. Unknown backends are a no-op.
pub async fn handle_remove_member(
    Extension(registry): Extension<Arc<MembershipRegistry>>,
    Path(backend): Path<String>,
) -> (StatusCode, String) {
    let members = registry.remove(&Backend::new(backend));
    (StatusCode::OK, join_backends(&members))
}

pub async fn handle_list_members(
    Extension(registry): Extension<Arc<MembershipRegistry>>,
) -> (StatusCode, String) {
    (StatusCode::OK, registry.list_joined())
}

pub async fn handle_metrics(
    Extension(metrics): Extension<Arc<ProxyMetrics>>,
) -> (StatusCode, Json<MetricsSnapshot>) {
    (StatusCode::OK, Json(metrics.snapshot()))
}
