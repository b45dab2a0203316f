//! Collaborator seams: where the page comes from, where the catalog comes
//! from, and where resolved events go.

use std::path::PathBuf;

use async_trait::async_trait;
use campusevents_extract::{FetchOptions, fetch_page};
use campusevents_shared::{
    BuildingRecord, CampusEventsError, ResolvedEvent, Result, RoomRecord,
};
use campusevents_storage::Storage;
use url::Url;

/// Raw page text plus the URL relative links resolve against.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub html: String,
    pub base_url: Option<Url>,
}

/// Supplies the newsletter page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn load(&self) -> Result<LoadedPage>;
}

/// Read-only snapshot of buildings and rooms.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn buildings(&self) -> Result<Vec<BuildingRecord>>;
    async fn rooms(&self) -> Result<Vec<RoomRecord>>;
}

/// Accepts one resolved event per call. Returns the stored ID.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn insert(&self, event: &ResolvedEvent) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Page sources
// ---------------------------------------------------------------------------

/// Fetches the page over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    pub url: Url,
    pub options: FetchOptions,
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn load(&self) -> Result<LoadedPage> {
        let html = fetch_page(&self.url, &self.options).await?;
        Ok(LoadedPage {
            html,
            base_url: Some(self.url.clone()),
        })
    }
}

/// Reads a previously saved page from disk.
#[derive(Debug, Clone)]
pub struct FilePageSource {
    pub path: PathBuf,
    pub base_url: Option<Url>,
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn load(&self) -> Result<LoadedPage> {
        let html = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CampusEventsError::io(&self.path, e))?;
        Ok(LoadedPage {
            html,
            base_url: self.base_url.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Storage-backed catalog and sink
// ---------------------------------------------------------------------------

#[async_trait]
impl CatalogSource for Storage {
    async fn buildings(&self) -> Result<Vec<BuildingRecord>> {
        self.list_buildings().await
    }

    async fn rooms(&self) -> Result<Vec<RoomRecord>> {
        self.list_rooms().await
    }
}

#[async_trait]
impl EventSink for Storage {
    async fn insert(&self, event: &ResolvedEvent) -> Result<String> {
        self.insert_event(event).await
    }
}
