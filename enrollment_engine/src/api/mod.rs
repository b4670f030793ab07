//! # Enrollment engine public API
//!
//! * [`catalog_api`] manages the event and workshop listings.
//! * [`checkout_flow_api`] handles gateway orders, payment verification and recording paid registrations.
//! * [`enquiry_api`] records the pre-payment enquiry form.
//!
//! # API usage
//!
//! Each API is created by supplying backends that implement the traits it needs:
//!
//! ```rust,ignore
//! use enrollment_engine::{CatalogApi, InMemoryCatalog, db_types::CatalogKind};
//! let api = CatalogApi::new(CatalogKind::Events, InMemoryCatalog::new());
//! let events = api.fetch_all().await?;
//! ```
pub mod catalog_api;
pub mod checkout_flow_api;
pub mod enquiry_api;
pub mod errors;
