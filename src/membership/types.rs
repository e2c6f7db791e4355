use serde::{Deserialize, Serialize};
use std::fmt;

/// A cache node, addressed by its `host:port` string.
///
/// The address is opaque to the router: it is hashed onto the ring and
/// handed to the forwarder, never parsed or validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Backend(pub String);

impl Backend {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Backend {
    fn from(addr: &str) -> Self {
        Self(addr.to_string())
    }
}

impl From<String> for Backend {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}

/// Joins members the way the management surface and `X-Backends` expect.
pub fn join_backends(backends: &[Backend]) -> String {
    backends
        .iter()
        .map(Backend::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
