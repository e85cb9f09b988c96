//! Domain models for the AP2 backend.

pub mod agent_log;
pub mod catalog;
pub mod mandate;
pub mod money;
pub mod payment;
pub mod wallet;

pub use agent_log::AgentActionLog;
pub use catalog::{CartItem, Product};
pub use mandate::{CartMandate, DEFAULT_CURRENCY, MandateId, PaymentMandate};
pub use money::{Currency, Money};
pub use payment::{MERCHANT_DISPLAY_NAME, PaymentOutcome, PaymentStatus, Receipt};
pub use wallet::{CardNetwork, PaymentMethod, PaymentMethodType, ShippingAddress, TokenRecord};
