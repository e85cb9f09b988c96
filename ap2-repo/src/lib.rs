//! # AP2 Repository
//!
//! Concrete adapters for the AP2 demo backend. Everything lives in process
//! memory: the merchant catalog, the account database, issued payment tokens
//! and the agent audit log.

pub mod challenge;
pub mod memory;
pub mod security;
pub mod seed;

#[cfg(test)]
mod memory_tests;

pub use challenge::{DEMO_CODE, FixedCode, RandomDigits};
pub use memory::InMemoryStore;

/// Builds a store preloaded with the demo catalog and account.
///
/// # Examples
///
/// ```
/// use ap2_repo::build_store;
///
/// let store = build_store();
/// assert!(store.token_record("tok_visa_4242").is_some());
/// ```
pub fn build_store() -> InMemoryStore {
    let store = InMemoryStore::seeded();
    tracing::debug!("in-memory store seeded");
    store
}
