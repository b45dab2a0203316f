//! SQL migration definitions for the campus events database.
//!
//! Migrations are applied in order when a local database is opened. Each
//! migration has a version number and a batch of SQL statements.

/// A database migration with a version and SQL statements.
pub(crate) struct Migration {
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

/// All migrations, in ascending version order.
pub(crate) fn all_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "Initial schema: buildings, rooms, events",
        sql: r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version    INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Building catalog
CREATE TABLE IF NOT EXISTS buildings (
    id        TEXT PRIMARY KEY,
    name      TEXT NOT NULL,
    category  TEXT NOT NULL DEFAULT '',
    latitude  REAL NOT NULL,
    longitude REAL NOT NULL
);

-- Rooms per building
CREATE TABLE IF NOT EXISTS rooms (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    building_id TEXT NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
    room_name   TEXT NOT NULL,
    UNIQUE(building_id, room_name)
);

CREATE INDEX IF NOT EXISTS idx_rooms_building_id ON rooms(building_id);

-- Resolved events
CREATE TABLE IF NOT EXISTS events (
    id                       TEXT PRIMARY KEY,
    title                    TEXT NOT NULL,
    description              TEXT NOT NULL DEFAULT '',
    building_id              TEXT NOT NULL,
    location_name            TEXT NOT NULL,
    room                     TEXT NOT NULL,
    latitude                 REAL NOT NULL,
    longitude                REAL NOT NULL,
    event_date               TEXT NOT NULL,
    event_time               TEXT NOT NULL,
    category                 TEXT NOT NULL,
    organization_name        TEXT NOT NULL DEFAULT '',
    organization_description TEXT NOT NULL DEFAULT '',
    instagram_link           TEXT,
    website_link             TEXT,
    doorlist_link            TEXT,
    custom_links             TEXT NOT NULL DEFAULT '[]',
    created_at               TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_date ON events(event_date, event_time);
CREATE INDEX IF NOT EXISTS idx_events_building_id ON events(building_id);

INSERT INTO schema_migrations (version) VALUES (1);
"#,
    }]
}
