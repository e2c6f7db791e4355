//! Management API Endpoints

/// Member list.
pub const ENDPOINT_MEMBERS: &str = "/members";
pub const ENDPOINT_MEMBERS_SLASH: &str = "/members/";
/// A single member, addressed by its `host:port`.
pub const ENDPOINT_MEMBER: &str = "/members/:backend";
/// One-shot metrics dump.
pub const ENDPOINT_METRICS: &str = "/metrics";
pub const ENDPOINT_METRICS_SLASH: &str = "/metrics/";
