//! Newsletter page fetch and event extraction.
//!
//! This crate provides:
//! - [`fetch`]: single-page HTTP fetch with a bounded timeout
//! - [`page`]: HTML → trimmed text lines and anchors
//! - [`lines`]: segmentation of lines into title/date/description triplets
//! - [`fields`]: date, time, and location parsing from a date line
//! - [`location`]: building/room split of a location phrase
//! - [`categorize`]: category tag and organization guesses
//! - [`links`]: association of page anchors with events
//!
//! [`extract_events`] ties these together into [`EventDraft`] records.

pub mod categorize;
pub mod fetch;
pub mod fields;
pub mod lines;
pub mod links;
pub mod location;
pub mod page;

use campusevents_shared::EventDraft;
use tracing::{debug, info};

pub use categorize::{categorize, categorize_all, guess_org_name, org_description};
pub use fetch::{FetchOptions, fetch_page};
pub use fields::{DateTimeLocation, convert_time_to_24h, month_number, parse_date_time_location};
pub use lines::{EventTriplet, SECTION_TITLES, classify_lines, is_date_line};
pub use links::{harvest_links, links_for_title};
pub use location::split_location;
pub use page::{PageContent, PageLink, lines_from_text, parse_page};

/// Build one draft from an accepted triplet. Never fails; unparseable
/// fragments leave their fields empty.
pub fn draft_from_triplet(triplet: &EventTriplet, year: i32) -> EventDraft {
    let fields = parse_date_time_location(&triplet.date_line, year);
    let (location_name, room) = split_location(fields.location.as_deref());
    let time_24h = convert_time_to_24h(fields.time_text.as_deref());

    let title = triplet.title.clone();
    let description = triplet.description.clone();

    debug!(
        %title,
        section = triplet.section.as_deref().unwrap_or("-"),
        tags = ?categorize_all(&title, &description),
        "extracted event"
    );

    EventDraft {
        category: categorize(&title, &description),
        organization_name: guess_org_name(&title, &description),
        organization_description: org_description(&description),
        title,
        description,
        location_name,
        room,
        date: fields.date,
        time: fields.time_text,
        time_24h,
        links: Vec::new(),
    }
}

/// Run the full extraction over one parsed page.
pub fn extract_events(page: &PageContent, year: i32) -> Vec<EventDraft> {
    let triplets = classify_lines(&page.lines);

    let mut events: Vec<EventDraft> = triplets
        .iter()
        .map(|t| draft_from_triplet(t, year))
        .collect();

    harvest_links(&mut events, &page.links);

    info!(
        lines = page.lines.len(),
        events = events.len(),
        undated = events.iter().filter(|e| e.date.is_none()).count(),
        "extracted events from page"
    );

    events
}
