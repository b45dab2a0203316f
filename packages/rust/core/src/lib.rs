//! Core pipeline orchestration for the campus events importer.
//!
//! This crate ties page extraction, location resolution, and storage into
//! the two end-to-end workflows: [`scrape`] (page → event drafts) and
//! [`populate`] (drafts → resolved events in the store).

pub mod catalog;
pub mod pipeline;
pub mod sources;
pub mod stats;

pub use catalog::{CatalogFile, CatalogImport, import_catalog, read_catalog, validate_catalog};
pub use pipeline::{
    PopulateOptions, ProgressReporter, ScrapeConfig, SilentProgress, populate, scrape,
};
pub use sources::{
    CatalogSource, EventSink, FilePageSource, HttpPageSource, LoadedPage, PageSource,
};
pub use stats::{InsertStats, MatchStats, PopulateReport};
