//! # Learning Destiny enrollment server
//! This crate hosts the HTTP server behind the Learning Destiny site. It is responsible for:
//! * Serving the event and workshop catalogs, and accepting edits to them from the admin panel.
//! * Creating Razorpay orders and verifying the signatures the checkout widget hands back.
//! * Appending paid registrations and enquiries to their Google spreadsheets.
//! * Generating `sitemap.xml`.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/sitemap.xml`: The site map.
//! * `/api/adminDetail/eventdetail` and `/api/workshops`: The catalogs (GET, POST, PUT, DELETE).
//! * `/api/order`, `/api/verify`: Gateway orders and payment verification.
//! * `/api/saveToSheet`, `/api/googleSheets`: Registration and enquiry rows.
//! * `/api/checkout`, `/api/checkout/complete`: The whole checkout flow, server side.

pub mod checkout_routes;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod sitemap;

#[cfg(test)]
mod endpoint_tests;
