//! Routing Module
//!
//! Decides which cache node serves a request and in which order the fallbacks
//! should be tried.
//!
//! ## Submodules
//! - **`router`**: ring lookup, preset handling and the alternate shuffle.
//! - **`protocol`**: `X-Backends` / `X-Cache` header names and parsing.

pub mod protocol;
pub mod router;

pub use router::{DEFAULT_REPLICAS, Router, Selection, SelectionSource};

#[cfg(test)]
mod tests;
