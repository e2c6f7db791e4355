//! Request Router
//!
//! Turns a routing key into a primary backend plus ordered alternates.
//!
//! ## Policy
//! - A non-empty preset list (from an upstream hop's `X-Backends`) is used as-is.
//!   The ring is not consulted and the order is not touched.
//! - Otherwise the ring supplies `replicas` distinct backends. The primary stays
//!   first and only the alternates are shuffled, so clients spread their
//!   fallback traffic without losing per-resource affinity.

use crate::error::{Error, Result};
use crate::membership::registry::MembershipRegistry;
use crate::membership::types::Backend;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use super::protocol::parse_backends_header;

pub const DEFAULT_REPLICAS: usize = 3;

/// Where a selection's backend list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Ring,
    Preset,
}

/// The outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub primary: Backend,
    pub alternates: Vec<Backend>,
    pub source: SelectionSource,
}

impl Selection {
    fn from_list(mut backends: Vec<Backend>, source: SelectionSource) -> Option<Self> {
        if backends.is_empty() {
            return None;
        }
        let alternates = backends.split_off(1);
        let primary = backends.pop()?;

        Some(Self {
            primary,
            alternates,
            source,
        })
    }
}

pub struct Router {
    registry: Arc<MembershipRegistry>,
    replicas: usize,
    /// Seeded generator for reproducible shuffles; `None` uses the thread RNG.
    rng: Option<Mutex<StdRng>>,
}

impl Router {
    pub fn new(registry: Arc<MembershipRegistry>, replicas: usize) -> Self {
        Self {
            registry,
            replicas: replicas.max(1),
            rng: None,
        }
    }

    /// A router whose alternate ordering is reproducible for a given seed.
    pub fn with_seed(registry: Arc<MembershipRegistry>, replicas: usize, seed: u64) -> Self {
        Self {
            registry,
            replicas: replicas.max(1),
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Routes a request identified by `key`, honouring a preset `X-Backends`
    /// header value when it carries at least one backend.
    pub fn route(&self, key: &str, preset: Option<&str>) -> Result<Selection> {
        if let Some(backends) = preset.and_then(parse_backends_header)
            && let Some(selection) = Selection::from_list(backends, SelectionSource::Preset)
        {
            tracing::debug!(
                "Routing {} to preset {} (+{} alternates)",
                key,
                selection.primary,
                selection.alternates.len()
            );
            return Ok(selection);
        }

        let backends = self.registry.get_n(key, self.replicas)?;
        let mut selection =
            Selection::from_list(backends, SelectionSource::Ring).ok_or(Error::EmptyRing)?;
        self.shuffle_alternates(&mut selection.alternates);

        tracing::debug!(
            "Routing {} to {} (+{} alternates)",
            key,
            selection.primary,
            selection.alternates.len()
        );

        Ok(selection)
    }

    fn shuffle_alternates(&self, alternates: &mut [Backend]) {
        match &self.rng {
            Some(rng) => shuffle(alternates, &mut *rng.lock()),
            None => shuffle(alternates, &mut rand::thread_rng()),
        }
    }
}

/// In-place random permutation: each slot `i` swaps with a uniformly chosen
/// slot in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(list: &mut [T], rng: &mut R) {
    for i in 0..list.len() {
        let j = rng.gen_range(0..=i);
        list.swap(i, j);
    }
}
