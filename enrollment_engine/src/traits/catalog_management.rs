use thiserror::Error;

use crate::db_types::{Event, EventUpdate, NewEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Event not found")]
    NotFound(i64),
    #[error("Event {id} was modified by someone else. Expected version {expected}, but it is at version {actual}")]
    VersionConflict { id: i64, expected: u64, actual: u64 },
    #[error("Catalog storage error: {0}")]
    StorageError(String),
}

/// The `CatalogManagement` trait defines the behaviour for storing event and workshop listings.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// All listings, in the order they were added.
    async fn fetch_all(&self) -> Result<Vec<Event>, CatalogError>;
    async fn fetch_by_id(&self, id: i64) -> Result<Option<Event>, CatalogError>;
    /// Stores a new listing under a freshly issued id and returns it. Ids are never reused.
    async fn insert(&self, event: NewEvent) -> Result<Event, CatalogError>;
    /// Merges the update into the listing with the same id. Fails with [`CatalogError::VersionConflict`] if the
    /// update carries a version that is not the current one.
    async fn update(&self, update: EventUpdate) -> Result<Event, CatalogError>;
    /// Removes the listing and returns it.
    async fn remove(&self, id: i64) -> Result<Event, CatalogError>;
}
