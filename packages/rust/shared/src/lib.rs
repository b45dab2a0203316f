//! Shared types, error model, and configuration for the campus events importer.
//!
//! This crate is the foundation depended on by all other campusevents crates.
//! It provides:
//! - [`CampusEventsError`]: the unified error type
//! - Domain types ([`EventDraft`], [`BuildingRecord`], [`RoomRecord`], [`ResolvedEvent`])
//! - The interchange format between the scrape and populate phases ([`interchange`])
//! - Configuration ([`AppConfig`], config loading, secret validation)

pub mod config;
pub mod error;
pub mod interchange;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, ResolveConfig, SourceConfig, StoreConfig, StoreSecrets, config_dir,
    config_file_path, init_config, load_config, load_config_from, validate_store_secrets,
};
pub use error::{CampusEventsError, Result};
pub use types::{
    BuildingRecord, Category, CustomLink, EventDraft, ResolvedEvent, RoomRecord,
    default_event_time,
};
