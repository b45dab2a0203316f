//! End-to-end pipelines: page → drafts (`scrape`) and drafts → store (`populate`).

use std::path::PathBuf;
use std::time::Instant;

use campusevents_extract::{extract_events, parse_page};
use campusevents_resolve::{Resolution, Resolver};
use campusevents_shared::{EventDraft, Result, interchange};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::sources::{CatalogSource, EventSink, PageSource};
use crate::stats::{InsertStats, MatchStats, PopulateReport};

/// Insert failures logged at warn level before the rest drop to debug.
const MAX_LOGGED_INSERT_ERRORS: usize = 3;

/// Title length shown in insert-failure logs.
const LOGGED_TITLE_CHARS: usize = 40;

/// Configuration for the `scrape` pipeline.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Year applied to every extracted date.
    pub year: i32,
    /// Where to write the interchange file, if anywhere.
    pub output: Option<PathBuf>,
}

/// Options for the `populate` pipeline.
#[derive(Debug, Clone, Default)]
pub struct PopulateOptions {
    /// Building categories never picked by random fallback.
    pub exclude_categories: Vec<String>,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each draft has been resolved and handed to the sink.
    fn event_processed(&self, title: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &PopulateReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn event_processed(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &PopulateReport) {}
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

/// Load the page, extract drafts, and optionally save them.
///
/// A load failure aborts the run. An empty result is not an error.
#[instrument(skip_all, fields(year = config.year))]
pub async fn scrape(config: &ScrapeConfig, source: &dyn PageSource) -> Result<Vec<EventDraft>> {
    let start = Instant::now();

    let page = source.load().await?;
    let content = parse_page(&page.html, page.base_url.as_ref());
    let events = extract_events(&content, config.year);

    if events.is_empty() {
        warn!(lines = content.lines.len(), "no events found on page");
    }

    if let Some(path) = &config.output {
        interchange::write_events(path, &events)?;
    }

    info!(
        events = events.len(),
        with_links = events.iter().filter(|e| !e.links.is_empty()).count(),
        elapsed_ms = start.elapsed().as_millis(),
        "scrape complete"
    );

    Ok(events)
}

// ---------------------------------------------------------------------------
// Populate
// ---------------------------------------------------------------------------

/// Resolve every draft against the catalog and insert it.
///
/// An empty catalog aborts before any insert. Each insert is attempted
/// independently; failures are counted and the batch continues.
#[instrument(skip_all, fields(drafts = drafts.len()))]
pub async fn populate<R: Rng + ?Sized>(
    drafts: &[EventDraft],
    catalog: &dyn CatalogSource,
    sink: &dyn EventSink,
    options: &PopulateOptions,
    progress: &dyn ProgressReporter,
    rng: &mut R,
) -> Result<PopulateReport> {
    let start = Instant::now();

    // --- Phase 1: Catalog snapshot ---
    progress.phase("Loading building catalog");
    let buildings = catalog.buildings().await?;
    let rooms = match catalog.rooms().await {
        Ok(rooms) => rooms,
        Err(e) => {
            warn!(error = %e, "failed to load rooms, continuing without known rooms");
            Vec::new()
        }
    };

    let resolver = Resolver::new(buildings, rooms, options.exclude_categories.clone())?;
    info!(
        buildings = resolver.buildings().len(),
        rooms = resolver.room_count(),
        "catalog loaded"
    );

    // --- Phase 2: Resolve and insert ---
    progress.phase("Resolving and inserting events");
    let mut matches = MatchStats::default();
    let mut inserts = InsertStats::default();
    let total = drafts.len();

    for (i, draft) in drafts.iter().enumerate() {
        match resolver.resolve(draft, rng)? {
            Resolution::Skipped(reason) => {
                debug!(title = %draft.title, ?reason, "draft skipped");
                matches.skipped += 1;
            }
            Resolution::Resolved { event, tier, .. } => {
                matches.record(tier);
                inserts.processed += 1;

                match sink.insert(&event).await {
                    Ok(id) => {
                        debug!(%id, title = %event.title, "event inserted");
                        inserts.inserted += 1;
                    }
                    Err(e) => {
                        inserts.errors += 1;
                        let title = truncate_title(&event.title);
                        if inserts.errors <= MAX_LOGGED_INSERT_ERRORS {
                            warn!(%title, error = %e, "failed to insert event");
                        } else {
                            debug!(%title, error = %e, "failed to insert event");
                        }
                    }
                }
            }
        }
        progress.event_processed(&draft.title, i + 1, total);
    }

    let report = PopulateReport {
        matches,
        inserts,
        elapsed: start.elapsed(),
    };

    progress.done(&report);

    info!(
        high = matches.high,
        medium = matches.medium,
        random = matches.random,
        skipped = matches.skipped,
        inserted = inserts.inserted,
        errors = inserts.errors,
        elapsed_ms = report.elapsed.as_millis(),
        "populate complete"
    );

    Ok(report)
}

fn truncate_title(title: &str) -> String {
    title.chars().take(LOGGED_TITLE_CHARS).collect()
}
