//! A small client for the parts of the Razorpay API that a hosted checkout needs: creating orders, verifying the
//! payment signature returned by the checkout widget, and building the widget's options.
mod api;
mod checkout;
mod config;
mod data_objects;
mod error;
pub mod signature;

pub use api::RazorpayApi;
pub use checkout::{CheckoutOptions, Prefill, Theme, CHECKOUT_SCRIPT_ID, CHECKOUT_SCRIPT_URL};
pub use config::RazorpayConfig;
pub use data_objects::{NewRazorpayOrder, RazorpayOrder};
pub use error::RazorpayApiError;
