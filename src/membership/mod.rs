//! Membership Module
//!
//! Keeps the live set of cache backends. The registry is the single writer of
//! the hash ring: the management surface adds and removes members through it
//! while request handlers read the ring concurrently.
//!
//! Membership lives in memory only and starts over on every restart.

pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;
