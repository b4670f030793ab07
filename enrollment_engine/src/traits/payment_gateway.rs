use thiserror::Error;

use crate::db_types::{GatewayOrder, NewGatewayOrder, PaymentConfirmation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentGatewayError {
    #[error("The payment gateway key secret is not configured.")]
    MissingSecret,
    #[error("Invalid order request. {0}")]
    InvalidOrder(String),
    #[error("The payment gateway rejected the request. {0}")]
    GatewayRejected(String),
    #[error("Could not reach the payment gateway. {0}")]
    CommunicationError(String),
}

/// The `PaymentGateway` trait covers the two server-side halves of a hosted checkout: issuing an order before the
/// widget opens, and checking the signature the widget hands back when the customer has paid.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError>;

    /// Returns `Ok(true)` iff the confirmation's signature was produced by the gateway for this order and payment.
    fn verify_payment(&self, confirmation: &PaymentConfirmation) -> Result<bool, PaymentGatewayError>;
}
