//! Concrete providers for the engine's backend traits.
pub mod razorpay;
pub mod sheets;

pub use razorpay::RazorpayGateway;
pub use sheets::SheetsLedger;
