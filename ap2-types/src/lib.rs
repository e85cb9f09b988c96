//! # AP2 Types
//!
//! Domain types and port traits for the agent payments (AP2) demo backend.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (mandates, catalog, wallet, receipts, money)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AgentActionLog, CardNetwork, CartItem, CartMandate, Currency, DEFAULT_CURRENCY, MandateId,
    Money, PaymentMandate, PaymentMethod, PaymentMethodType, PaymentOutcome, PaymentStatus,
    Product, Receipt, ShippingAddress, TokenRecord,
};
pub use dto::*;
pub use error::{AppError, CredentialError, DomainError, PaymentError, RepoError};
pub use ports::{
    AgentLogRepository, Ap2Repository, CatalogRepository, ChallengeCodeGenerator,
    CredentialResolver, WalletRepository,
};
