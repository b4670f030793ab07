use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{CatalogKind, Event, EventUpdate, NewEvent},
    traits::{CatalogError, CatalogManagement},
};

/// `CatalogApi` fronts one listing catalog (events or workshops).
pub struct CatalogApi<B> {
    kind: CatalogKind,
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi({})", self.kind)
    }
}

impl<B> CatalogApi<B> {
    pub fn new(kind: CatalogKind, db: B) -> Self {
        Self { kind, db }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub async fn fetch_all(&self) -> Result<Vec<Event>, CatalogError> {
        self.db.fetch_all().await
    }

    /// Fetches a single listing. Unlike the backend call, a missing listing is an error here.
    pub async fn fetch_by_id(&self, id: i64) -> Result<Event, CatalogError> {
        self.db.fetch_by_id(id).await?.ok_or(CatalogError::NotFound(id))
    }

    pub async fn create(&self, event: NewEvent) -> Result<Event, CatalogError> {
        let event = self.db.insert(event).await?;
        info!("📚️ New {} listing #{}: {}", self.kind, event.id, event.title);
        if let Err(e) = event.price_in_paise() {
            warn!("📚️ Listing #{} has a price that cannot be charged. {e}", event.id);
        }
        Ok(event)
    }

    pub async fn update(&self, update: EventUpdate) -> Result<Event, CatalogError> {
        let id = update.id;
        let event = self.db.update(update).await.map_err(|e| {
            debug!("📚️ Could not update {} listing #{id}. {e}", self.kind);
            e
        })?;
        info!("📚️ Updated {} listing #{id} to version {}", self.kind, event.version);
        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> Result<Event, CatalogError> {
        let event = self.db.remove(id).await?;
        info!("📚️ Deleted {} listing #{id}: {}", self.kind, event.title);
        Ok(event)
    }
}

/// Both catalogs, so that they can be registered with a web server as one piece of shared state.
pub struct Catalogs<B> {
    pub events: CatalogApi<B>,
    pub workshops: CatalogApi<B>,
}

impl<B> Debug for Catalogs<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Catalogs")
    }
}

impl<B> Catalogs<B> {
    pub fn new(events: B, workshops: B) -> Self {
        Self {
            events: CatalogApi::new(CatalogKind::Events, events),
            workshops: CatalogApi::new(CatalogKind::Workshops, workshops),
        }
    }

    pub fn get(&self, kind: CatalogKind) -> &CatalogApi<B> {
        match kind {
            CatalogKind::Events => &self.events,
            CatalogKind::Workshops => &self.workshops,
        }
    }
}
