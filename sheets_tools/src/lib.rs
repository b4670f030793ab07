//! A minimal Google Sheets client for appending rows with a service account.
//!
//! Only `spreadsheets.values.append` is supported. Authentication uses the OAuth 2.0 JWT-bearer flow: a JWT signed
//! with the service account's RSA key is exchanged for a short-lived access token, which is cached until shortly
//! before it expires.
mod api;
mod auth;
mod config;
mod data_objects;
mod error;

pub use api::SheetsApi;
pub use auth::{ServiceAccountAuth, ServiceAccountClaims, SHEETS_SCOPE};
pub use config::{SheetsConfig, DEFAULT_SHEETS_API_URL, DEFAULT_SHEET_RANGE, DEFAULT_TOKEN_URI};
pub use data_objects::{AppendResponse, UpdatedValues};
pub use error::SheetsApiError;
