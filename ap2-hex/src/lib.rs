//! # AP2 Hex
//!
//! Application service layer and HTTP adapter for the AP2 demo backend.
//!
//! ## Architecture
//!
//! - `service/` - One application service per agent role (merchant,
//!   credentials provider, payment processor)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - Generated API document
//!
//! Services are generic over the port traits in `ap2_types::ports`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{MerchantService, PaymentChallengeCoordinator, WalletService};
