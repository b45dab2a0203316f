//! Location splitter: building-name candidate plus optional room.

use std::sync::LazyLock;

use regex::Regex;

/// Keywords that introduce a room designation, tried in order.
const ROOM_KEYWORDS: &[&str] = &["Room", "Hall", "Theater", "Theatre"];

/// A trailing room number such as `141` or `141A`.
static ROOM_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[A-Za-z]?$").expect("room number regex"));

/// Split a location phrase into `(building, room)`.
///
/// Rules, first match wins:
/// 1. A room keyword followed by more text splits the phrase at the keyword
///    (`Nau Hall 101` → `Nau` / `Hall 101`). A keyword that ends the phrase
///    is part of the building name (`Old Cabell Hall`).
/// 2. A trailing room number becomes the room (`Gibson 141` → `Gibson` / `141`).
/// 3. Otherwise the whole phrase is the building.
pub fn split_location(phrase: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(loc) = phrase.map(str::trim).filter(|l| !l.is_empty()) else {
        return (None, None);
    };

    for kw in ROOM_KEYWORDS {
        let Some(idx) = loc.find(kw) else {
            continue;
        };
        let building = loc[..idx].trim_matches(|c: char| c == ' ' || c == ',');
        let room = loc[idx..].trim();
        if !building.is_empty() && room.len() > kw.len() {
            return (Some(building.to_string()), Some(room.to_string()));
        }
    }

    let tokens: Vec<&str> = loc.split_whitespace().collect();
    if let Some((last, rest)) = tokens.split_last() {
        if ROOM_NUMBER_RE.is_match(last) {
            let building = rest.join(" ");
            let building = building.trim_matches(|c: char| c == ' ' || c == ',');
            let building = (!building.is_empty()).then(|| building.to_string());
            return (building, Some(last.to_string()));
        }
    }

    (Some(loc.to_string()), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> (Option<String>, Option<String>) {
        split_location(Some(s))
    }

    fn pair(b: Option<&str>, r: Option<&str>) -> (Option<String>, Option<String>) {
        (b.map(String::from), r.map(String::from))
    }

    #[test]
    fn trailing_room_number() {
        assert_eq!(split("Gibson 141"), pair(Some("Gibson"), Some("141")));
        assert_eq!(split("Gilmer 141A"), pair(Some("Gilmer"), Some("141A")));
        assert_eq!(split("Monroe, 130"), pair(Some("Monroe"), Some("130")));
    }

    #[test]
    fn keyword_at_end_stays_in_building() {
        assert_eq!(split("Old Cabell Hall"), pair(Some("Old Cabell Hall"), None));
        assert_eq!(split("Culbreth Theatre"), pair(Some("Culbreth Theatre"), None));
    }

    #[test]
    fn keyword_rule_fires_before_trailing_number() {
        assert_eq!(split("Nau Hall 101"), pair(Some("Nau"), Some("Hall 101")));
    }

    #[test]
    fn keywords_tried_in_order() {
        assert_eq!(
            split("Rice Hall Room 130"),
            pair(Some("Rice Hall"), Some("Room 130"))
        );
        // A bare trailing "Room" is skipped, so the "Hall" split applies.
        assert_eq!(
            split("Newcomb Hall, Commonwealth Room"),
            pair(Some("Newcomb"), Some("Hall, Commonwealth Room"))
        );
    }

    #[test]
    fn keyword_at_start_is_not_a_split() {
        assert_eq!(split("Hall of Fame 12"), pair(Some("Hall of Fame"), Some("12")));
    }

    #[test]
    fn plain_building() {
        assert_eq!(
            split("1515 University Ave."),
            pair(Some("1515 University Ave."), None)
        );
        assert_eq!(split("  The Lawn "), pair(Some("The Lawn"), None));
    }

    #[test]
    fn bare_number_has_no_building() {
        assert_eq!(split("141"), pair(None, Some("141")));
    }

    #[test]
    fn absent_input() {
        assert_eq!(split_location(None), pair(None, None));
        assert_eq!(split_location(Some("   ")), pair(None, None));
    }
}
