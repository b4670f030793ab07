mod catalog;
mod seed;

pub use catalog::InMemoryCatalog;
pub use seed::{default_events, load_seed_file, SeedError};
