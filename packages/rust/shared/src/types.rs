//! Core domain types for scraped and resolved campus events.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Start time used when an event's time text is missing or unparseable (noon).
pub fn default_event_time() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Coarse event category shown to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Campus Events")]
    CampusEvents,
    #[serde(rename = "Free Food")]
    FreeFood,
    #[serde(rename = "Sports")]
    Sports,
    #[serde(rename = "Arts")]
    Arts,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Club Events")]
    ClubEvents,
}

impl Category {
    /// Every category, in categorizer priority order.
    pub const ALL: [Category; 6] = [
        Self::CampusEvents,
        Self::FreeFood,
        Self::Sports,
        Self::Arts,
        Self::Entertainment,
        Self::ClubEvents,
    ];

    /// Display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampusEvents => "Campus Events",
            Self::FreeFood => "Free Food",
            Self::Sports => "Sports",
            Self::Arts => "Arts",
            Self::Entertainment => "Entertainment",
            Self::ClubEvents => "Club Events",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::CampusEventsError::parse(format!("unknown category: {s}")))
    }
}

// ---------------------------------------------------------------------------
// EventDraft
// ---------------------------------------------------------------------------

/// An event extracted from the newsletter text, before location resolution.
///
/// This is also the record shape of the interchange file written by `scrape`
/// and read by `populate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Building-name candidate split off the location phrase.
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    /// Calendar date, serialized as `MM/DD/YYYY` or `null`.
    #[serde(default, with = "mmddyyyy")]
    pub date: Option<NaiveDate>,
    /// Original time text, e.g. `6 – 8:30 p.m.`.
    #[serde(default)]
    pub time: Option<String>,
    /// Start time in 24-hour form, serialized as `HH:MM:SS`.
    #[serde(default = "default_event_time", with = "hhmmss")]
    pub time_24h: NaiveTime,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization_description: Option<String>,
    /// Page links in first-seen order, without duplicates.
    #[serde(default)]
    pub links: Vec<String>,
}

mod mmddyyyy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

mod hhmmss {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// A canonical campus building, read from the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A bookable room belonging to a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub building_id: String,
    pub room_name: String,
}

// ---------------------------------------------------------------------------
// ResolvedEvent
// ---------------------------------------------------------------------------

/// An overflow link that did not fit one of the fixed link slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLink {
    pub name: String,
    pub url: String,
}

/// An event with a concrete building, room, and classified links,
/// ready to hand to the persistence sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEvent {
    pub title: String,
    pub description: String,
    pub building_id: String,
    /// Canonical building name.
    pub location_name: String,
    pub room: String,
    pub latitude: f64,
    pub longitude: f64,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub category: Category,
    pub organization_name: String,
    pub organization_description: String,
    pub instagram_link: Option<String>,
    pub website_link: Option<String>,
    pub doorlist_link: Option<String>,
    pub custom_links: Vec<CustomLink>,
}
