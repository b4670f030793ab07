use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The lifecycle of a single checkout attempt.
///
/// ```text
/// Idle -> OrderCreated -> GatewayOpened -> PaymentCompleted -> VerificationPending -> Verified
///                                       \-> PaymentCancelled                      \-> VerificationFailed
/// Verified -> PersistencePending -> Saved | SaveFailed
/// ```
///
/// Every failure state is terminal. Nothing is retried automatically, and a payment that reached `SaveFailed` has
/// still been taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CheckoutState {
    #[default]
    Idle,
    OrderCreated,
    GatewayOpened,
    PaymentCompleted,
    PaymentCancelled,
    VerificationPending,
    Verified,
    VerificationFailed,
    PersistencePending,
    Saved,
    SaveFailed,
}

/// Things that happen to a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutEvent {
    OrderCreated,
    GatewayOpened,
    PaymentCompleted,
    PaymentCancelled,
    VerificationStarted,
    SignatureValid,
    SignatureInvalid,
    PersistenceStarted,
    RowSaved,
    SaveFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Checkout cannot go from {from:?} on {event:?}")]
pub struct InvalidTransition {
    pub from: CheckoutState,
    pub event: CheckoutEvent,
}

impl CheckoutState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PaymentCancelled | Self::VerificationFailed | Self::Saved | Self::SaveFailed)
    }

    pub fn advance(self, event: CheckoutEvent) -> Result<Self, InvalidTransition> {
        use CheckoutEvent as E;
        use CheckoutState as S;
        let next = match (self, event) {
            (S::Idle, E::OrderCreated) => S::OrderCreated,
            (S::OrderCreated, E::GatewayOpened) => S::GatewayOpened,
            (S::GatewayOpened, E::PaymentCompleted) => S::PaymentCompleted,
            (S::GatewayOpened, E::PaymentCancelled) => S::PaymentCancelled,
            (S::PaymentCompleted, E::VerificationStarted) => S::VerificationPending,
            (S::VerificationPending, E::SignatureValid) => S::Verified,
            (S::VerificationPending, E::SignatureInvalid) => S::VerificationFailed,
            (S::Verified, E::PersistenceStarted) => S::PersistencePending,
            (S::PersistencePending, E::RowSaved) => S::Saved,
            (S::PersistencePending, E::SaveFailed) => S::SaveFailed,
            (from, event) => return Err(InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// The message shown to the customer once the attempt has finished.
    pub fn customer_message(&self) -> &'static str {
        match self {
            Self::Saved => "Payment completed and details saved successfully.",
            Self::SaveFailed => "Failed to save data to Google Sheets.",
            Self::VerificationFailed => "Payment verification failed.",
            Self::PaymentCancelled => "Payment was cancelled.",
            _ => "Payment is still in progress.",
        }
    }
}

impl Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
