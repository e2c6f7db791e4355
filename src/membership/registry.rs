use crate::error::Result;
use crate::ring::HashRing;

use parking_lot::RwLock;
use std::sync::Arc;

use super::types::{Backend, join_backends};

/// Owner of the process-wide hash ring.
///
/// Mutations take the write lock, so at most one membership change runs at a
/// time and lookups never observe a half-applied add or remove.
pub struct MembershipRegistry {
    ring: RwLock<HashRing>,
}

impl MembershipRegistry {
    pub fn new(virtual_nodes: usize) -> Arc<Self> {
        Arc::new(Self {
            ring: RwLock::new(HashRing::with_virtual_nodes(virtual_nodes)),
        })
    }

    /// Creates a registry pre-populated with `seeds`.
    pub fn with_members<I>(virtual_nodes: usize, seeds: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Backend>,
    {
        let mut ring = HashRing::with_virtual_nodes(virtual_nodes);
        for backend in seeds {
            tracing::info!("Adding backend: {}", backend);
            ring.add(backend);
        }

        Arc::new(Self {
            ring: RwLock::new(ring),
        })
    }

    /// Registers `backend` and returns the member list after the change.
    pub fn add(&self, backend: Backend) -> Vec<Backend> {
        let mut ring = self.ring.write();
        let label = backend.to_string();

        if ring.add(backend) {
            tracing::info!("Adding backend: {} ({} members)", label, ring.len());
        } else {
            tracing::debug!("Backend {} already registered", label);
        }

        ring.members()
    }

    /// Deregisters `backend` and returns the member list after the change.
    /// Unknown backends leave the ring untouched.
    pub fn remove(&self, backend: &Backend) -> Vec<Backend> {
        let mut ring = self.ring.write();

        if ring.remove(backend) {
            tracing::info!("Removing backend: {} ({} members)", backend, ring.len());
        } else {
            tracing::debug!("Remove for unknown backend {}", backend);
        }

        ring.members()
    }

    pub fn list(&self) -> Vec<Backend> {
        self.ring.read().members()
    }

    pub fn list_joined(&self) -> String {
        join_backends(&self.list())
    }

    pub fn len(&self) -> usize {
        self.ring.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.read().is_empty()
    }

    pub fn get_n(&self, key: &str, n: usize) -> Result<Vec<Backend>> {
        self.ring.read().get_n(key, n)
    }

    /// A detached copy of the ring as it is right now.
    pub fn snapshot(&self) -> HashRing {
        self.ring.read().clone()
    }
}
