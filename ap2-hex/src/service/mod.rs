//! Application Services
//!
//! One service per agent role. Services orchestrate domain operations
//! through the repository ports and contain NO infrastructure logic.

mod merchant;
mod processor;
mod wallet;

pub use merchant::{DEFAULT_KNOWN_AGENTS, MERCHANT_ID, MerchantService};
pub use processor::{CHALLENGE_MESSAGE, PaymentChallengeCoordinator};
pub use wallet::WalletService;
