//! Interchange file between the scrape and populate phases.
//!
//! The file is a pretty-printed JSON array of [`EventDraft`] records, written
//! by `scrape` and read back by `populate`.

use std::path::Path;

use crate::error::{CampusEventsError, Result};
use crate::types::EventDraft;

/// Serialize drafts to the interchange text form.
pub fn to_string(events: &[EventDraft]) -> Result<String> {
    serde_json::to_string_pretty(events)
        .map_err(|e| CampusEventsError::parse(format!("failed to encode events: {e}")))
}

/// Parse drafts from the interchange text form.
pub fn from_str(content: &str) -> Result<Vec<EventDraft>> {
    serde_json::from_str(content)
        .map_err(|e| CampusEventsError::parse(format!("failed to decode events: {e}")))
}

/// Write drafts to `path`, creating parent directories as needed.
pub fn write_events(path: &Path, events: &[EventDraft]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CampusEventsError::io(parent, e))?;
    }
    let content = to_string(events)?;
    std::fs::write(path, content).map_err(|e| CampusEventsError::io(path, e))?;
    tracing::info!(?path, count = events.len(), "saved events");
    Ok(())
}

/// Read drafts previously written by [`write_events`].
pub fn read_events(path: &Path) -> Result<Vec<EventDraft>> {
    let content = std::fs::read_to_string(path).map_err(|e| CampusEventsError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| CampusEventsError::parse(format!("{}: {e}", path.display())))
}
