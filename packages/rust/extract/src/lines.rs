//! Line classifier: segments the flat line stream into event triplets.
//!
//! The newsletter lays every event out as three consecutive lines:
//! - title
//! - `Mon. D, time, location`
//! - one-line description
//!
//! interleaved with uppercase section headers (`ENGAGE`, `LEARN`, ...).

use std::sync::LazyLock;

use regex::Regex;

/// Uppercase section headers used by the newsletter.
pub const SECTION_TITLES: &[&str] = &["ENGAGE", "LEARN", "BE WELL", "ARTS", "TALKS"];

/// Matches a line that starts with an abbreviated month and a 1–2 digit day.
static DATE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(Jan\.?|Feb\.?|Mar\.?|Apr\.?|May|Jun\.?|Jul\.?|Aug\.?|Sept\.?|Sep\.?|Oct\.?|Nov\.?|Dec\.?)\s+\d{1,2}",
    )
    .expect("date line regex")
});

/// One accepted `(title, date line, description)` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTriplet {
    /// Section header most recently seen above this event.
    pub section: Option<String>,
    pub title: String,
    pub date_line: String,
    /// Empty when the page ends right after the date line.
    pub description: String,
}

/// Whether `line` opens with a month abbreviation followed by a day number.
pub fn is_date_line(line: &str) -> bool {
    DATE_LINE_RE.is_match(line)
}

/// Whether `line` is one of the fixed section headers.
pub fn is_section_title(line: &str) -> bool {
    SECTION_TITLES.contains(&line)
}

/// Scan trimmed, non-empty lines and collect event triplets in page order.
///
/// A candidate title is accepted only when the following line is a date line;
/// the three lines are then consumed together. Scanning stops once fewer than
/// two lines remain.
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<EventTriplet> {
    let mut triplets = Vec::new();
    let mut section: Option<String> = None;
    let mut i = 0;

    while i + 1 < lines.len() {
        let line = lines[i].as_ref().trim();

        if is_section_title(line) {
            section = Some(line.to_string());
            i += 1;
            continue;
        }

        let next = lines[i + 1].as_ref().trim();
        if !is_date_line(next) {
            i += 1;
            continue;
        }

        let description = lines
            .get(i + 2)
            .map(|l| l.as_ref().trim().to_string())
            .unwrap_or_default();

        triplets.push(EventTriplet {
            section: section.clone(),
            title: line.to_string(),
            date_line: next.to_string(),
            description,
        });
        i += 3;
    }

    triplets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_line_detection() {
        assert!(is_date_line("Nov. 16, 12 p.m., 1515 University Ave."));
        assert!(is_date_line("Sept 4, 6 p.m., Newcomb Hall"));
        assert!(is_date_line("May 1"));
        assert!(is_date_line("Oct. 31–Nov. 2, 7 p.m."));
        assert!(!is_date_line("November 16, noon"));
        assert!(!is_date_line("nov. 16"));
        assert!(!is_date_line("Join us Nov. 16"));
        assert!(!is_date_line("Nov."));
    }

    #[test]
    fn triplets_and_sections() {
        let lines = [
            "Connections",
            "ENGAGE",
            "Fall Fest",
            "Oct. 3, 5 p.m., The Lawn",
            "Games, music and free food on the Lawn.",
            "LEARN",
            "Resume Workshop",
            "Oct. 7, 2 p.m., Bryan Hall 330",
            "Bring a draft resume.",
        ];
        let triplets = classify_lines(&lines);

        assert_eq!(triplets.len(), 2);
        assert_eq!(triplets[0].title, "Fall Fest");
        assert_eq!(triplets[0].section.as_deref(), Some("ENGAGE"));
        assert_eq!(triplets[1].title, "Resume Workshop");
        assert_eq!(triplets[1].date_line, "Oct. 7, 2 p.m., Bryan Hall 330");
        assert_eq!(triplets[1].description, "Bring a draft resume.");
        assert_eq!(triplets[1].section.as_deref(), Some("LEARN"));
    }

    #[test]
    fn non_titles_are_skipped_one_line_at_a_time() {
        let lines = [
            "Intro paragraph about the week.",
            "Another intro line.",
            "Poetry Night",
            "Nov. 2, 8 p.m., Clark Hall 108",
            "Read your own work.",
        ];
        let triplets = classify_lines(&lines);
        assert_eq!(triplets.len(), 1);
        assert_eq!(triplets[0].title, "Poetry Night");
        assert!(triplets[0].section.is_none());
    }

    #[test]
    fn consumed_lines_are_not_reexamined() {
        // The description line looks like a title for the following date line,
        // but it was already consumed by the first triplet.
        let lines = [
            "First Event",
            "Nov. 1, 1 p.m., Rice Hall",
            "Second Event",
            "Nov. 2, 2 p.m., Olsson Hall",
            "Details.",
        ];
        let triplets = classify_lines(&lines);
        assert_eq!(triplets.len(), 1);
        assert_eq!(triplets[0].description, "Second Event");
    }

    #[test]
    fn missing_description_is_empty() {
        let lines = ["Late Addition", "Dec. 5, 4 p.m., Alderman Library"];
        let triplets = classify_lines(&lines);
        assert_eq!(triplets.len(), 1);
        assert_eq!(triplets[0].description, "");
    }

    #[test]
    fn short_inputs_yield_nothing() {
        assert!(classify_lines::<&str>(&[]).is_empty());
        assert!(classify_lines(&["Only a title"]).is_empty());
        assert!(classify_lines(&["ENGAGE", "ARTS"]).is_empty());
    }
}
