//! Payment gateway seam.
//!
//! Only intent creation is modelled. [`FakePaymentGateway`] stands in for a
//! real processor and always succeeds.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Currency every intent is created in.
pub const CURRENCY: &str = "pln";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub amount: i64,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment rejected: {0}")]
    Rejected(String),

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for `amount` minor units of `currency`.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

#[derive(Debug, Default, Clone)]
pub struct FakePaymentGateway;

impl FakePaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        tracing::debug!(amount, currency, "Creating fake payment intent");
        let client_secret = format!(
            "pi_{}_secret_{}",
            Uuid::now_v7().simple(),
            Uuid::new_v4().simple()
        );

        Ok(PaymentIntent {
            client_secret,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_gateway_echoes_amount_with_unique_secret() {
        let gateway = FakePaymentGateway::new();
        let a = gateway.create_payment_intent(1234, CURRENCY).await.unwrap();
        let b = gateway.create_payment_intent(1234, CURRENCY).await.unwrap();

        assert_eq!(a.amount, 1234);
        assert!(a.client_secret.starts_with("pi_"));
        assert_ne!(a.client_secret, b.client_secret);
    }
}
