//! Building catalog import from a JSON file.

use std::collections::HashSet;
use std::path::Path;

use campusevents_shared::{BuildingRecord, CampusEventsError, Result, RoomRecord};
use campusevents_storage::Storage;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// On-disk catalog: `{ "buildings": [...], "rooms": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub buildings: Vec<BuildingRecord>,
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
}

/// Counts from one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogImport {
    pub buildings: usize,
    pub rooms_added: usize,
    /// Rooms already present, or pointing at an unknown building.
    pub rooms_skipped: usize,
}

/// Read and validate a catalog file.
pub fn read_catalog(path: &Path) -> Result<CatalogFile> {
    let content = std::fs::read_to_string(path).map_err(|e| CampusEventsError::io(path, e))?;
    let catalog: CatalogFile = serde_json::from_str(&content)
        .map_err(|e| CampusEventsError::parse(format!("{}: {e}", path.display())))?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Reject buildings with blank IDs or names, non-finite coordinates, or
/// duplicate IDs.
pub fn validate_catalog(catalog: &CatalogFile) -> Result<()> {
    let mut seen = HashSet::new();
    for b in &catalog.buildings {
        if b.id.trim().is_empty() || b.name.trim().is_empty() {
            return Err(CampusEventsError::validation(format!(
                "building with blank id or name: {:?}",
                b.id
            )));
        }
        if !b.latitude.is_finite() || !b.longitude.is_finite() {
            return Err(CampusEventsError::validation(format!(
                "building {} has invalid coordinates",
                b.id
            )));
        }
        if !seen.insert(b.id.as_str()) {
            return Err(CampusEventsError::validation(format!(
                "duplicate building id: {}",
                b.id
            )));
        }
    }
    Ok(())
}

/// Write a catalog into the store. Buildings are upserted; rooms are added
/// once per building.
#[instrument(skip_all, fields(buildings = catalog.buildings.len(), rooms = catalog.rooms.len()))]
pub async fn import_catalog(storage: &Storage, catalog: &CatalogFile) -> Result<CatalogImport> {
    validate_catalog(catalog)?;
    let mut result = CatalogImport::default();

    for building in &catalog.buildings {
        storage.insert_building(building).await?;
        result.buildings += 1;
    }

    let known: HashSet<String> = storage
        .list_buildings()
        .await?
        .into_iter()
        .map(|b| b.id)
        .collect();

    for room in &catalog.rooms {
        if !known.contains(&room.building_id) {
            warn!(
                building_id = %room.building_id,
                room = %room.room_name,
                "room references unknown building, skipping"
            );
            result.rooms_skipped += 1;
            continue;
        }
        if storage.insert_room(room).await? {
            result.rooms_added += 1;
        } else {
            result.rooms_skipped += 1;
        }
    }

    info!(
        buildings = result.buildings,
        rooms_added = result.rooms_added,
        rooms_skipped = result.rooms_skipped,
        "catalog imported"
    );
    Ok(result)
}
