//! Link harvester: attaches page anchors to the events they mention.

use campusevents_shared::EventDraft;

use crate::page::PageLink;

/// Number of leading title characters an anchor's text must contain.
const TITLE_PREFIX_CHARS: usize = 30;

/// Links whose anchor text contains the first 30 characters of `title`,
/// in page order, first occurrence only.
pub fn links_for_title(title: &str, links: &[PageLink]) -> Vec<String> {
    let prefix: String = title.chars().take(TITLE_PREFIX_CHARS).collect();
    let mut matches: Vec<String> = Vec::new();

    for link in links {
        if link.text.is_empty() || !link.text.contains(prefix.as_str()) {
            continue;
        }
        if !matches.contains(&link.href) {
            matches.push(link.href.clone());
        }
    }

    matches
}

/// Replace each event's links with the anchors that mention its title.
pub fn harvest_links(events: &mut [EventDraft], links: &[PageLink]) {
    for event in events.iter_mut() {
        event.links = links_for_title(&event.title, links);
    }
}
