use thiserror::Error;

use crate::{
    checkout::InvalidTransition,
    traits::{LedgerError, PaymentGatewayError},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Invalid amount. {0}")]
    InvalidAmount(String),
    #[error("{0}")]
    GatewayError(#[from] PaymentGatewayError),
    #[error("{0}")]
    LedgerError(#[from] LedgerError),
    #[error("{0}")]
    InvalidTransition(#[from] InvalidTransition),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnquiryError {
    #[error("Please fill out all the fields before enrolling. Missing: {0}")]
    IncompleteForm(String),
    #[error("{0}")]
    LedgerError(#[from] LedgerError),
}
