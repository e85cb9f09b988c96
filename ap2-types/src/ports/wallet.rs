//! Credentials provider ports.

use crate::domain::{MandateId, PaymentMethod, ShippingAddress};
use crate::error::{CredentialError, RepoError};

/// Wallet operations exposed by the credentials provider.
#[async_trait::async_trait]
pub trait WalletRepository: Send + Sync + 'static {
    /// Payment methods stored for an account. Unknown accounts have none.
    async fn payment_methods(&self, email: &str) -> Result<Vec<PaymentMethod>, RepoError>;

    /// Shipping address of an account, if the account exists.
    async fn shipping_address(&self, email: &str) -> Result<Option<ShippingAddress>, RepoError>;

    /// Issues a new opaque token referring to one of the account's methods.
    async fn create_payment_token(
        &self,
        email: &str,
        alias: Option<&str>,
    ) -> Result<String, RepoError>;
}

/// Maps a payment token to the stored payment method it stands for.
///
/// Implementations MUST fail with [`CredentialError::InvalidToken`] for unknown
/// tokens and never return a method in that case.
#[async_trait::async_trait]
pub trait CredentialResolver: Send + Sync + 'static {
    async fn resolve(
        &self,
        token: &str,
        mandate_id: &MandateId,
    ) -> Result<PaymentMethod, CredentialError>;
}
