//! Keyword categorizer and organization attributor.

use std::sync::LazyLock;

use campusevents_shared::Category;
use regex::Regex;

const FOOD_WORDS: &[&str] = &[
    "pizza", "bodo", "bagel", "food", "lunch", "dinner", "snacks", "feast",
];
const FREE_WORDS: &[&str] = &["free", "no cost", "provided"];
const SPORT_WORDS: &[&str] = &[
    "5k", "run", "race", "game", "tournament", "intramural", "sports",
];
const ARTS_WORDS: &[&str] = &[
    "concert", "showcase", "performance", "ensemble", "dance", "arts", "a cappella", "theater",
    "music",
];
const SOCIAL_WORDS: &[&str] = &["party", "social", "mixer", "movie"];
const CLUB_WORDS: &[&str] = &[
    "club", "council", "association", "student org", "@ uva", "at uva",
];

/// Title marker that signals the title itself names an organization.
const INSTITUTION_MARKER: &str = "UVA";

/// Generic event-type words that end an organization name inside a title.
const CHOP_WORDS: &[&str] = &["Showcase", "Concert", "Competition", "Event", "Workshop"];

static ORG_AT_SIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][A-Za-z0-9 '&]+ @ UVA)").expect("org @ regex"));

static ORG_AT_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][A-Za-z0-9 '&]+ at UVA)").expect("org at regex"));

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Every tag whose keywords appear, in priority order, starting with the
/// always-present base tag.
pub fn categorize_all(title: &str, description: &str) -> Vec<Category> {
    let text = format!("{title} {description}").to_lowercase();
    let mut cats = vec![Category::CampusEvents];

    if contains_any(&text, FOOD_WORDS) && contains_any(&text, FREE_WORDS) {
        cats.push(Category::FreeFood);
    }
    if contains_any(&text, SPORT_WORDS) {
        cats.push(Category::Sports);
    }
    if contains_any(&text, ARTS_WORDS) {
        cats.push(Category::Arts);
        cats.push(Category::Entertainment);
    } else if contains_any(&text, SOCIAL_WORDS) {
        cats.push(Category::Entertainment);
    }
    if contains_any(&text, CLUB_WORDS) {
        cats.push(Category::ClubEvents);
    }

    cats
}

/// The single surfaced category: the highest-priority matched tag, or
/// [`Category::CampusEvents`] when only the base tag applies.
pub fn categorize(title: &str, description: &str) -> Category {
    categorize_all(title, description)
        .into_iter()
        .find(|c| *c != Category::CampusEvents)
        .unwrap_or_default()
}

/// Best-guess organization name.
///
/// Tries, in order: `Name @ UVA` in the description, `Name at UVA` in the
/// description, then a title mentioning UVA cut before its event-type word.
pub fn guess_org_name(title: &str, description: &str) -> Option<String> {
    if let Some(m) = ORG_AT_SIGN_RE.captures(description) {
        return Some(m[1].to_string());
    }
    if let Some(m) = ORG_AT_WORD_RE.captures(description) {
        return Some(m[1].to_string());
    }

    if !title.contains(INSTITUTION_MARKER) {
        return None;
    }

    let part = CHOP_WORDS
        .iter()
        .find_map(|w| title.find(w).map(|idx| &title[..idx]))
        .unwrap_or(title);
    let name = part.trim_matches(|c: char| matches!(c, ' ' | '-' | ':' | ','));

    (!name.is_empty()).then(|| name.to_string())
}

/// First sentence of the description, used as the organization blurb.
pub fn org_description(description: &str) -> Option<String> {
    let sentence = description.split('.').next().unwrap_or_default().trim();
    (!sentence.is_empty()).then(|| sentence.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_food_needs_a_free_signal() {
        assert_eq!(
            categorize("Bagel Breakfast", "Free bagels from Bodo's."),
            Category::FreeFood
        );
        assert_eq!(
            categorize("Lunch and Learn", "Bring your own lunch."),
            Category::CampusEvents
        );
    }

    #[test]
    fn first_match_wins() {
        let text = "Free pizza provided after the intramural tournament.";
        assert_eq!(categorize("Pickup Night", text), Category::FreeFood);
        assert_eq!(
            categorize_all("Pickup Night", text),
            vec![Category::CampusEvents, Category::FreeFood, Category::Sports]
        );
    }

    #[test]
    fn arts_adds_entertainment_too() {
        assert_eq!(
            categorize_all("Fall Dance Showcase", "Student ensembles perform."),
            vec![Category::CampusEvents, Category::Arts, Category::Entertainment]
        );
        assert_eq!(categorize("Fall Dance Showcase", ""), Category::Arts);
    }

    #[test]
    fn social_only_is_entertainment() {
        assert_eq!(categorize("Movie Under the Stars", ""), Category::Entertainment);
    }

    #[test]
    fn club_keywords() {
        assert_eq!(
            categorize("Interest Meeting", "Hosted by the Honor Council."),
            Category::ClubEvents
        );
    }

    #[test]
    fn default_is_campus_events() {
        assert_eq!(categorize("Study Break", "Relax between exams."), Category::CampusEvents);
    }

    #[test]
    fn org_from_at_sign() {
        assert_eq!(
            guess_org_name("Open Mic", "Hosted by Poetry Club @ UVA and friends."),
            Some("Hosted by Poetry Club @ UVA".into())
        );
    }

    #[test]
    fn org_from_at_word() {
        assert_eq!(
            guess_org_name("Open Mic", "Join Women in Tech at UVA tonight."),
            Some("Join Women in Tech at UVA".into())
        );
    }

    #[test]
    fn org_from_title_marker() {
        assert_eq!(
            guess_org_name("UVA Chamber Singers Concert", "An evening of song."),
            Some("UVA Chamber Singers".into())
        );
        assert_eq!(
            guess_org_name("UVA Hack Club - Workshop", ""),
            Some("UVA Hack Club".into())
        );
        assert_eq!(guess_org_name("UVA Day of Service", ""), Some("UVA Day of Service".into()));
    }

    #[test]
    fn org_absent_without_signals() {
        assert_eq!(guess_org_name("Poetry Night", "Read your own work."), None);
    }

    #[test]
    fn org_description_is_first_sentence() {
        assert_eq!(
            org_description("Student groups perform. Free pizza provided."),
            Some("Student groups perform".into())
        );
        assert_eq!(org_description(""), None);
        assert_eq!(org_description(". Leading period"), None);
    }
}
