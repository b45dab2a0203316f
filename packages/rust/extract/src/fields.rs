//! Field extractor for `date, time, location` lines.
//!
//! Every field degrades independently: an unparseable date becomes `None`,
//! a missing time falls back to noon, and nothing here returns an error.

use std::sync::LazyLock;

use campusevents_shared::default_event_time;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// Month abbreviations as printed in the newsletter, trailing period removed.
const MONTHS: &[(&str, u32)] = &[
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("May", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sept", 9),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

/// Characters that open the second half of a range (`Nov. 16–18`, `6 – 8 p.m.`).
const RANGE_DASHES: &[char] = &['–', '—'];

/// `hour[:minute] am|pm`, tolerant of missing periods.
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*(a\.?m\.?|p\.?m\.?)").expect("clock regex")
});

/// Fields pulled out of one date line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeLocation {
    pub date: Option<NaiveDate>,
    /// Time segment as printed, only when it carries an a.m./p.m. marker.
    pub time_text: Option<String>,
    /// Everything after the time segment, rejoined with commas.
    pub location: Option<String>,
}

/// Parse `"Nov. 16, 12 p.m., 1515 University Ave."` style lines.
pub fn parse_date_time_location(line: &str, year: i32) -> DateTimeLocation {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();

    let date = parts.first().and_then(|clause| parse_date_clause(clause, year));

    let time_text = parts
        .get(1)
        .filter(|p| {
            let lower = p.to_lowercase();
            lower.contains("a.m.") || lower.contains("p.m.")
        })
        .map(|p| p.to_string());

    let location = if parts.len() >= 3 {
        Some(parts[2..].join(", ").trim().to_string()).filter(|l| !l.is_empty())
    } else {
        None
    };

    DateTimeLocation {
        date,
        time_text,
        location,
    }
}

/// Look up a month token such as `Nov.` or `Sept`. Case-sensitive.
pub fn month_number(token: &str) -> Option<u32> {
    let key = token.trim_end_matches('.');
    MONTHS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, month)| *month)
}

fn parse_date_clause(clause: &str, year: i32) -> Option<NaiveDate> {
    let start = clause.split(RANGE_DASHES).next()?.trim();
    let mut tokens = start.split_whitespace();

    let month = month_number(tokens.next()?)?;
    let digits: String = tokens
        .next()?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let day: u32 = digits.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert time text such as `12 p.m.` or `6 – 8:30 p.m.` to the 24-hour start time.
///
/// Only the start of a range is kept. Missing or unparseable text yields noon.
pub fn convert_time_to_24h(time_text: Option<&str>) -> NaiveTime {
    let Some(text) = time_text else {
        return default_event_time();
    };

    let lower = text.to_lowercase();
    let start = lower
        .split(|c: char| c == '-' || RANGE_DASHES.contains(&c))
        .next()
        .unwrap_or_default()
        .trim();

    let Some(caps) = CLOCK_RE.captures(start) else {
        return default_event_time();
    };

    let Ok(mut hour) = caps[1].parse::<u32>() else {
        return default_event_time();
    };
    let minute = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);
    let period = &caps[3];

    if period.contains('p') && hour != 12 {
        hour += 12;
    } else if period.contains('a') && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_else(default_event_time)
}
