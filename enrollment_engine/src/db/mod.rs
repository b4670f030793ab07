//! Storage backends for the enrollment engine.
//!
//! Listings are kept in process memory and are reset on restart. Seed data can be loaded from the built-in listings
//! or from a JSON file.
pub mod memory;
