use std::sync::Arc;

use log::*;
use tokio::sync::RwLock;

use crate::{
    db_types::{Event, EventUpdate, NewEvent},
    traits::{CatalogError, CatalogManagement},
};

#[derive(Debug)]
struct CatalogState {
    events: Vec<Event>,
    /// `None` once every id up to `i64::MAX` has been issued.
    next_id: Option<i64>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self { events: Vec::new(), next_id: Some(1) }
    }
}

/// A thread-safe, in-memory listing store.
///
/// Records keep their insertion order. Ids come from a counter that only moves forward, so an id that has been deleted
/// is never handed out again.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `events`. Duplicate ids in the seed are dropped, keeping the first occurrence.
    pub fn with_events(events: Vec<Event>) -> Self {
        let mut unique: Vec<Event> = Vec::with_capacity(events.len());
        for event in events {
            if unique.iter().any(|e| e.id == event.id) {
                warn!("📚️ Duplicate listing id {} in seed data. Ignoring '{}'", event.id, event.title);
                continue;
            }
            unique.push(event);
        }
        let next_id = match unique.iter().map(|e| e.id).max() {
            Some(max) => max.checked_add(1).map(|id| id.max(1)),
            None => Some(1),
        };
        if next_id.is_none() {
            warn!("📚️ Seed data uses the largest possible listing id. No new listings can be added.");
        }
        let state = CatalogState { events: unique, next_id };
        Self { state: Arc::new(RwLock::new(state)) }
    }
}

impl CatalogManagement for InMemoryCatalog {
    async fn fetch_all(&self) -> Result<Vec<Event>, CatalogError> {
        let state = self.state.read().await;
        Ok(state.events.clone())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Event>, CatalogError> {
        let state = self.state.read().await;
        Ok(state.events.iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, CatalogError> {
        let mut state = self.state.write().await;
        let id = state.next_id.ok_or_else(|| CatalogError::StorageError("No listing ids are left".into()))?;
        state.next_id = id.checked_add(1);
        let event = event.into_event(id);
        state.events.push(event.clone());
        trace!("📚️ Stored listing #{id}");
        Ok(event)
    }

    async fn update(&self, update: EventUpdate) -> Result<Event, CatalogError> {
        let mut state = self.state.write().await;
        let id = update.id;
        let event = state.events.iter_mut().find(|e| e.id == id).ok_or(CatalogError::NotFound(id))?;
        if let Some(expected) = update.version {
            if expected != event.version {
                return Err(CatalogError::VersionConflict { id, expected, actual: event.version });
            }
        }
        event.apply(update);
        Ok(event.clone())
    }

    async fn remove(&self, id: i64) -> Result<Event, CatalogError> {
        let mut state = self.state.write().await;
        let index = state.events.iter().position(|e| e.id == id).ok_or(CatalogError::NotFound(id))?;
        Ok(state.events.remove(index))
    }
}
