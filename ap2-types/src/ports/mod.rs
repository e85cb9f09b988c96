//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod agent_log;
mod catalog;
mod challenge;
mod wallet;

pub use agent_log::AgentLogRepository;
pub use catalog::CatalogRepository;
pub use challenge::ChallengeCodeGenerator;
pub use wallet::{CredentialResolver, WalletRepository};

/// Everything the HTTP adapter needs from a single backing store.
///
/// Blanket-implemented for any type that implements all role ports.
pub trait Ap2Repository:
    CatalogRepository + AgentLogRepository + WalletRepository + CredentialResolver
{
}

impl<T> Ap2Repository for T where
    T: CatalogRepository + AgentLogRepository + WalletRepository + CredentialResolver
{
}
