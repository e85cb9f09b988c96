//! Credentials provider: wallet reads and payment-token issuance.

use std::sync::Arc;

use ap2_types::{
    AppError, PaymentMethod, ShippingAddress, TokenizeRequest, TokenizeResponse, WalletRepository,
};

/// Application service for the credentials provider role.
pub struct WalletService<W: WalletRepository> {
    repo: Arc<W>,
}

impl<W: WalletRepository> WalletService<W> {
    pub fn new(repo: Arc<W>) -> Self {
        Self { repo }
    }

    /// Lists stored payment methods. Unknown accounts have an empty wallet.
    pub async fn payment_methods(&self, email: &str) -> Result<Vec<PaymentMethod>, AppError> {
        self.repo.payment_methods(email).await.map_err(Into::into)
    }

    /// Gets the shipping address of an account.
    ///
    /// An unknown account is a 404, not an empty address object.
    pub async fn shipping_address(&self, email: &str) -> Result<ShippingAddress, AppError> {
        self.repo
            .shipping_address(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No shipping address for {}", email)))
    }

    /// Issues a payment token for one of the account's methods.
    pub async fn tokenize(&self, req: TokenizeRequest) -> Result<TokenizeResponse, AppError> {
        // A blank email is rejected outright instead of falling through to an empty wallet
        if req.email.trim().is_empty() {
            return Err(AppError::BadRequest("Email cannot be empty".into()));
        }

        let token = self
            .repo
            .create_payment_token(&req.email, req.alias.as_deref())
            .await?;
        Ok(TokenizeResponse { token })
    }
}
