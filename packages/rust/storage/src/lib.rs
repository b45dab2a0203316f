//! libSQL storage layer for the building catalog and resolved events.
//!
//! The [`Storage`] struct wraps a libSQL database holding three tables:
//! buildings, rooms, and events.
//!
//! **Access modes:**
//! - local file, read-write with migrations via [`Storage::open`]
//! - local file, read-only via [`Storage::open_readonly`]
//! - remote endpoint + access token via [`Storage::open_remote`]; the schema
//!   there is owned by the service and no migrations run

mod migrations;

use std::path::Path;

use campusevents_shared::{
    BuildingRecord, CampusEventsError, Category, CustomLink, ResolvedEvent, Result, RoomRecord,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use libsql::{Connection, Database, params};
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Primary storage handle wrapping a libSQL database.
#[derive(Debug)]
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
    readonly: bool,
}

/// An event row as persisted, with its generated ID.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub id: String,
    pub created_at: String,
    pub event: ResolvedEvent,
}

impl Storage {
    /// Open or create a database at `path` in read-write mode.
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CampusEventsError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        let storage = Self {
            db,
            conn,
            readonly: false,
        };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Open a database at `path` in read-only mode.
    pub async fn open_readonly(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CampusEventsError::Storage(format!(
                "database not found: {}",
                path.display()
            )));
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        Ok(Self {
            db,
            conn,
            readonly: true,
        })
    }

    /// Connect to a remote libSQL endpoint with an access token.
    pub async fn open_remote(url: &str, token: &str) -> Result<Self> {
        let db = libsql::Builder::new_remote(url.to_string(), token.to_string())
            .build()
            .await
            .map_err(|e| CampusEventsError::Storage(format!("{url}: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        tracing::debug!(%url, "connected to remote store");

        Ok(Self {
            db,
            conn,
            readonly: false,
        })
    }

    /// Run pending schema migrations.
    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                tracing::info!(
                    version = migration.version,
                    description = migration.description,
                    "applying migration"
                );
                self.conn
                    .execute_batch(migration.sql)
                    .await
                    .map_err(|e| {
                        CampusEventsError::Storage(format!(
                            "migration v{} failed: {e}",
                            migration.version
                        ))
                    })?;
            }
        }
        Ok(())
    }

    /// Get the current schema version, or 0 if no migrations have been applied.
    async fn get_schema_version(&self) -> u32 {
        let result = self
            .conn
            .query("SELECT MAX(version) FROM schema_migrations", params![])
            .await;

        match result {
            Ok(mut rows) => {
                if let Ok(Some(row)) = rows.next().await {
                    row.get::<u32>(0).unwrap_or(0)
                } else {
                    0
                }
            }
            Err(_) => 0, // Table doesn't exist yet
        }
    }

    /// Ensure we're in read-write mode before writing.
    fn check_writable(&self) -> Result<()> {
        if self.readonly {
            return Err(CampusEventsError::Storage(
                "database is opened in read-only mode".into(),
            ));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Catalog operations
    // -----------------------------------------------------------------------

    /// Insert a building, replacing name/category/coordinates on ID conflict.
    pub async fn insert_building(&self, building: &BuildingRecord) -> Result<()> {
        self.check_writable()?;
        self.conn
            .execute(
                "INSERT INTO buildings (id, name, category, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   category = excluded.category,
                   latitude = excluded.latitude,
                   longitude = excluded.longitude",
                params![
                    building.id.as_str(),
                    building.name.as_str(),
                    building.category.as_str(),
                    building.latitude,
                    building.longitude,
                ],
            )
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Insert a room. Returns `false` if the building already had it.
    pub async fn insert_room(&self, room: &RoomRecord) -> Result<bool> {
        self.check_writable()?;
        let changed = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO rooms (building_id, room_name) VALUES (?1, ?2)",
                params![room.building_id.as_str(), room.room_name.as_str()],
            )
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;
        Ok(changed > 0)
    }

    /// All buildings, ordered by name.
    pub async fn list_buildings(&self) -> Result<Vec<BuildingRecord>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, name, category, latitude, longitude FROM buildings ORDER BY name",
                params![],
            )
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            results.push(BuildingRecord {
                id: row
                    .get::<String>(0)
                    .map_err(|e| CampusEventsError::Storage(e.to_string()))?,
                name: row
                    .get::<String>(1)
                    .map_err(|e| CampusEventsError::Storage(e.to_string()))?,
                category: row.get::<String>(2).unwrap_or_default(),
                latitude: row
                    .get::<f64>(3)
                    .map_err(|e| CampusEventsError::Storage(e.to_string()))?,
                longitude: row
                    .get::<f64>(4)
                    .map_err(|e| CampusEventsError::Storage(e.to_string()))?,
            });
        }
        Ok(results)
    }

    /// All rooms, grouped by building then name.
    pub async fn list_rooms(&self) -> Result<Vec<RoomRecord>> {
        let mut rows = self
            .conn
            .query(
                "SELECT building_id, room_name FROM rooms ORDER BY building_id, room_name",
                params![],
            )
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            results.push(RoomRecord {
                building_id: row
                    .get::<String>(0)
                    .map_err(|e| CampusEventsError::Storage(e.to_string()))?,
                room_name: row
                    .get::<String>(1)
                    .map_err(|e| CampusEventsError::Storage(e.to_string()))?,
            });
        }
        Ok(results)
    }

    // -----------------------------------------------------------------------
    // Event operations
    // -----------------------------------------------------------------------

    /// Insert one resolved event. Returns the generated event ID.
    pub async fn insert_event(&self, event: &ResolvedEvent) -> Result<String> {
        self.check_writable()?;
        let id = Uuid::now_v7().to_string();
        let now = Utc::now().to_rfc3339();
        let custom_links = serde_json::to_string(&event.custom_links)
            .map_err(|e| CampusEventsError::Storage(format!("custom_links: {e}")))?;

        self.conn
            .execute(
                "INSERT INTO events (
                   id, title, description, building_id, location_name, room,
                   latitude, longitude, event_date, event_time, category,
                   organization_name, organization_description,
                   instagram_link, website_link, doorlist_link, custom_links, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                params![
                    id.as_str(),
                    event.title.as_str(),
                    event.description.as_str(),
                    event.building_id.as_str(),
                    event.location_name.as_str(),
                    event.room.as_str(),
                    event.latitude,
                    event.longitude,
                    event.event_date.format(DATE_FORMAT).to_string(),
                    event.event_time.format(TIME_FORMAT).to_string(),
                    event.category.as_str(),
                    event.organization_name.as_str(),
                    event.organization_description.as_str(),
                    event.instagram_link.as_deref(),
                    event.website_link.as_deref(),
                    event.doorlist_link.as_deref(),
                    custom_links,
                    now.as_str(),
                ],
            )
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;
        Ok(id)
    }

    /// Stored events ordered by date and time.
    pub async fn list_events(&self) -> Result<Vec<StoredEvent>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, created_at, title, description, building_id, location_name, room,
                        latitude, longitude, event_date, event_time, category,
                        organization_name, organization_description,
                        instagram_link, website_link, doorlist_link, custom_links
                 FROM events ORDER BY event_date, event_time, title",
                params![],
            )
            .await
            .map_err(|e| CampusEventsError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            results.push(row_to_stored_event(&row)?);
        }
        Ok(results)
    }
}

/// Convert a database row to a [`StoredEvent`].
fn row_to_stored_event(row: &libsql::Row) -> Result<StoredEvent> {
    let text = |idx: i32| -> Result<String> {
        row.get::<String>(idx)
            .map_err(|e| CampusEventsError::Storage(e.to_string()))
    };
    let real = |idx: i32| -> Result<f64> {
        row.get::<f64>(idx)
            .map_err(|e| CampusEventsError::Storage(e.to_string()))
    };

    let event_date = NaiveDate::parse_from_str(&text(9)?, DATE_FORMAT)
        .map_err(|e| CampusEventsError::Storage(format!("invalid event_date: {e}")))?;
    let event_time = NaiveTime::parse_from_str(&text(10)?, TIME_FORMAT)
        .map_err(|e| CampusEventsError::Storage(format!("invalid event_time: {e}")))?;
    let category: Category = text(11)?.parse()?;
    let custom_links: Vec<CustomLink> = serde_json::from_str(&text(17)?)
        .map_err(|e| CampusEventsError::Storage(format!("invalid custom_links: {e}")))?;

    Ok(StoredEvent {
        id: text(0)?,
        created_at: text(1)?,
        event: ResolvedEvent {
            title: text(2)?,
            description: text(3)?,
            building_id: text(4)?,
            location_name: text(5)?,
            room: text(6)?,
            latitude: real(7)?,
            longitude: real(8)?,
            event_date,
            event_time,
            category,
            organization_name: text(12)?,
            organization_description: text(13)?,
            instagram_link: row.get::<String>(14).ok(),
            website_link: row.get::<String>(15).ok(),
            doorlist_link: row.get::<String>(16).ok(),
            custom_links,
        },
    })
}
