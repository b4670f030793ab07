//! Backend traits for the enrollment engine.
//!
//! The engine APIs are generic over these traits so that the catalog store, the payment gateway and the spreadsheet
//! ledgers can be swapped for mocks in tests, or for a different provider, without touching the request flow.
mod catalog_management;
mod payment_gateway;
mod registrant_ledger;

pub use catalog_management::{CatalogError, CatalogManagement};
pub use payment_gateway::{PaymentGateway, PaymentGatewayError};
pub use registrant_ledger::{LedgerError, RegistrantLedger};
