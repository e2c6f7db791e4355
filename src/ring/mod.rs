//! Consistent Hashing Module
//!
//! Places cache backends on a hash ring so that a given resource keeps landing
//! on the same node while the membership changes underneath it.
//!
//! ## Core Concepts
//! - **Virtual nodes**: every backend is hashed under several salts, which evens
//!   out the arc lengths each node owns.
//! - **Stability**: adding or removing one backend only relocates the keys that
//!   backend gains or loses; every other key keeps its owner.
//! - **Replica walk**: `get_n` walks clockwise from a key and collects distinct
//!   backends, giving a primary plus fallbacks in ring order.

pub mod hashring;

pub use hashring::{DEFAULT_VIRTUAL_NODES, HashRing};
