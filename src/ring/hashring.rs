use crate::error::{Error, Result};
use crate::membership::types::Backend;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// Positions placed on the ring for every backend unless configured otherwise.
pub const DEFAULT_VIRTUAL_NODES: usize = 20;

/// Consistent hash ring with virtual nodes.
///
/// Each backend is hashed under `virtual_nodes` salts, so it owns that many
/// points on a `u64` circle. A key belongs to the first point at or after its
/// own hash, wrapping around at the end of the space.
#[derive(Debug, Clone)]
pub struct HashRing {
    /// Ring position -> owning backend.
    positions: BTreeMap<u64, Backend>,
    members: BTreeSet<Backend>,
    virtual_nodes: usize,
}

impl HashRing {
    pub fn new() -> Self {
        Self::with_virtual_nodes(DEFAULT_VIRTUAL_NODES)
    }

    pub fn with_virtual_nodes(virtual_nodes: usize) -> Self {
        Self {
            positions: BTreeMap::new(),
            members: BTreeSet::new(),
            virtual_nodes: virtual_nodes.max(1),
        }
    }

    pub fn virtual_nodes(&self) -> usize {
        self.virtual_nodes
    }

    /// Number of distinct backends on the ring.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, backend: &Backend) -> bool {
        self.members.contains(backend)
    }

    /// Places `backend` on the ring. Returns `false` if it was already there.
    pub fn add(&mut self, backend: Backend) -> bool {
        if self.members.contains(&backend) {
            return false;
        }

        for position in self.positions_for(&backend) {
            // A u64 collision with another backend keeps the existing owner.
            self.positions
                .entry(position)
                .or_insert_with(|| backend.clone());
        }
        self.members.insert(backend);

        true
    }

    /// Takes `backend` off the ring. Returns `false` if it was not a member.
    pub fn remove(&mut self, backend: &Backend) -> bool {
        if !self.members.remove(backend) {
            return false;
        }

        for position in self.positions_for(backend) {
            if self.positions.get(&position) == Some(backend) {
                self.positions.remove(&position);
            }
        }

        true
    }

    /// Returns up to `n` distinct backends, walking clockwise from `key`.
    ///
    /// The first element is the key's owner. Fewer than `n` backends are
    /// returned when the ring has fewer distinct members.
    pub fn get_n(&self, key: &str, n: usize) -> Result<Vec<Backend>> {
        if self.positions.is_empty() {
            return Err(Error::EmptyRing);
        }

        let wanted = n.min(self.members.len());
        let mut selected: Vec<Backend> = Vec::with_capacity(wanted);
        if wanted == 0 {
            return Ok(selected);
        }

        let hash = hash_of(key);
        let clockwise = self
            .positions
            .range(hash..)
            .chain(self.positions.range(..hash));

        for (_, backend) in clockwise {
            if !selected.contains(backend) {
                selected.push(backend.clone());
                if selected.len() == wanted {
                    break;
                }
            }
        }

        Ok(selected)
    }

    /// The single backend that owns `key`.
    pub fn get(&self, key: &str) -> Result<Backend> {
        self.get_n(key, 1)?
            .into_iter()
            .next()
            .ok_or(Error::EmptyRing)
    }

    /// Current members in a stable (sorted) order.
    pub fn members(&self) -> Vec<Backend> {
        self.members.iter().cloned().collect()
    }

    /// Number of ring positions currently owned by `backend`.
    pub fn positions_of(&self, backend: &Backend) -> usize {
        self.positions.values().filter(|owner| *owner == backend).count()
    }

    fn positions_for(&self, backend: &Backend) -> Vec<u64> {
        (0..self.virtual_nodes)
            .map(|i| hash_of(&format!("{}#{}", backend, i)))
            .collect()
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_of(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
