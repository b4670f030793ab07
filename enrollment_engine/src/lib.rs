//! Enrollment Engine
//!
//! The enrollment engine holds the business logic behind the Learning Destiny site: the event and workshop catalogs,
//! and the checkout flow that takes a registrant from a payment-gateway order to a row in the registrations ledger.
//! It is provider-agnostic. The payment gateway and the ledgers are reached through the traits in [`traits`], and
//! concrete providers live in the server crate.
//!
//! The library is divided into:
//! 1. Storage ([`mod@db`]). Listings are held in memory and reset on restart.
//! 2. The public API ([`mod@api`]): [`CatalogApi`], [`CheckoutFlowApi`] and [`EnquiryApi`].
//! 3. The checkout state machine ([`mod@checkout`]), which names every state an attempt can be in and the
//!    transitions between them.
pub mod api;
pub mod checkout;
pub mod db;
pub mod db_types;
pub mod traits;

pub use api::{
    catalog_api::{CatalogApi, Catalogs},
    checkout_flow_api::{CheckoutCompletion, CheckoutFlowApi, CheckoutOutcome},
    enquiry_api::EnquiryApi,
    errors::{CheckoutError, EnquiryError},
};
pub use db::memory::InMemoryCatalog;
pub use traits::{
    CatalogError,
    CatalogManagement,
    LedgerError,
    PaymentGateway,
    PaymentGatewayError,
    RegistrantLedger,
};
