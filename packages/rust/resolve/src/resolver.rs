//! Turns an [`EventDraft`] into a [`ResolvedEvent`] against a catalog snapshot.

use std::collections::HashMap;

use campusevents_shared::{
    BuildingRecord, CampusEventsError, EventDraft, ResolvedEvent, Result, RoomRecord,
};
use rand::Rng;
use tracing::{debug, warn};

use crate::assign::{choose_room, classify_links, random_building};
use crate::matcher::{MatchTier, match_building};

/// Why a draft was not resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    MissingDate,
}

/// Result of resolving one draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        event: ResolvedEvent,
        tier: MatchTier,
        confidence: f64,
    },
    Skipped(SkipReason),
}

/// Catalog snapshot used for one population run.
#[derive(Debug, Clone)]
pub struct Resolver {
    buildings: Vec<BuildingRecord>,
    rooms_by_building: HashMap<String, Vec<RoomRecord>>,
    exclude_categories: Vec<String>,
}

impl Resolver {
    /// Build a resolver. Fails when the catalog has no buildings.
    pub fn new(
        buildings: Vec<BuildingRecord>,
        rooms: Vec<RoomRecord>,
        exclude_categories: Vec<String>,
    ) -> Result<Self> {
        if buildings.is_empty() {
            return Err(CampusEventsError::catalog("building catalog is empty"));
        }

        let mut rooms_by_building: HashMap<String, Vec<RoomRecord>> = HashMap::new();
        for room in rooms {
            rooms_by_building
                .entry(room.building_id.clone())
                .or_default()
                .push(room);
        }

        Ok(Self {
            buildings,
            rooms_by_building,
            exclude_categories,
        })
    }

    pub fn buildings(&self) -> &[BuildingRecord] {
        &self.buildings
    }

    /// Total rooms across all buildings.
    pub fn room_count(&self) -> usize {
        self.rooms_by_building.values().map(Vec::len).sum()
    }

    /// Known rooms for a building, possibly empty.
    pub fn rooms_for(&self, building_id: &str) -> &[RoomRecord] {
        self.rooms_by_building
            .get(building_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Match, fall back, pick a room, and slot links for one draft.
    pub fn resolve<R: Rng + ?Sized>(&self, draft: &EventDraft, rng: &mut R) -> Result<Resolution> {
        if draft.title.trim().is_empty() {
            return Ok(Resolution::Skipped(SkipReason::MissingTitle));
        }
        let Some(event_date) = draft.date else {
            debug!(title = %draft.title, "skipping event without date");
            return Ok(Resolution::Skipped(SkipReason::MissingDate));
        };

        let matched = match_building(draft.location_name.as_deref(), &self.buildings);
        let tier = matched.tier();

        let building = match matched.building {
            Some(b) => {
                debug!(
                    title = %draft.title,
                    location = draft.location_name.as_deref().unwrap_or(""),
                    building = %b.name,
                    confidence = matched.confidence,
                    "matched building"
                );
                b
            }
            None => {
                let b = random_building(&self.buildings, &self.exclude_categories, rng)?;
                warn!(
                    title = %draft.title,
                    location = draft.location_name.as_deref().unwrap_or(""),
                    building = %b.name,
                    "no confident match, using random building"
                );
                b
            }
        };

        let room = choose_room(self.rooms_for(&building.id), draft.room.as_deref(), rng);
        let slots = classify_links(&draft.links);

        let event = ResolvedEvent {
            title: draft.title.clone(),
            description: draft.description.clone(),
            building_id: building.id.clone(),
            location_name: building.name.clone(),
            room,
            latitude: building.latitude,
            longitude: building.longitude,
            event_date,
            event_time: draft.time_24h,
            category: draft.category,
            organization_name: draft.organization_name.clone().unwrap_or_default(),
            organization_description: draft.organization_description.clone().unwrap_or_default(),
            instagram_link: slots.instagram,
            website_link: slots.website,
            doorlist_link: slots.doorlist,
            custom_links: slots.custom,
        };

        Ok(Resolution::Resolved {
            event,
            tier,
            confidence: matched.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusevents_shared::Category;
    use chrono::{NaiveDate, NaiveTime};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn building(id: &str, name: &str, category: &str) -> BuildingRecord {
        BuildingRecord {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            latitude: 38.0,
            longitude: -78.5,
        }
    }

    fn resolver() -> Resolver {
        Resolver::new(
            vec![
                building("nau", "Nau Hall", "Academic"),
                building("gibson", "Gibson Hall", "Academic"),
                building("dorm", "Lile-Maupin House", "Residence"),
            ],
            vec![
                RoomRecord {
                    building_id: "nau".into(),
                    room_name: "Nau 101".into(),
                },
            ],
            vec!["Residence".into()],
        )
        .unwrap()
    }

    fn draft(title: &str, location: Option<&str>, room: Option<&str>) -> EventDraft {
        EventDraft {
            title: title.into(),
            description: "An evening of fun.".into(),
            location_name: location.map(String::from),
            room: room.map(String::from),
            date: NaiveDate::from_ymd_opt(2025, 11, 20),
            time: Some("7 p.m.".into()),
            time_24h: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            category: Category::Entertainment,
            organization_name: None,
            organization_description: Some("An evening of fun".into()),
            links: vec![
                "https://instagram.com/fun".into(),
                "https://fun.example.org".into(),
            ],
        }
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Resolver::new(vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, CampusEventsError::Catalog { .. }));
    }

    #[test]
    fn matched_event_copies_building_fields() {
        let r = resolver();
        let mut rng = StdRng::seed_from_u64(3);
        let res = r.resolve(&draft("Game Night", Some("Nau"), Some("Hall 101")), &mut rng).unwrap();

        let Resolution::Resolved { event, tier, confidence } = res else {
            panic!("expected resolved event");
        };
        assert_eq!(tier, MatchTier::High);
        assert_eq!(confidence, 0.95);
        assert_eq!(event.building_id, "nau");
        assert_eq!(event.location_name, "Nau Hall");
        assert_eq!(event.room, "Nau 101");
        assert_eq!(event.latitude, 38.0);
        assert_eq!(event.event_time, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert_eq!(event.organization_name, "");
        assert_eq!(event.organization_description, "An evening of fun");
        assert_eq!(event.instagram_link.as_deref(), Some("https://instagram.com/fun"));
        assert_eq!(event.website_link.as_deref(), Some("https://fun.example.org"));
        assert!(event.doorlist_link.is_none());
    }

    #[test]
    fn extracted_room_kept_when_building_has_no_rooms() {
        let r = resolver();
        let mut rng = StdRng::seed_from_u64(3);
        let res = r.resolve(&draft("Movie", Some("Gibson"), Some("141")), &mut rng).unwrap();
        let Resolution::Resolved { event, .. } = res else {
            panic!("expected resolved event");
        };
        assert_eq!(event.building_id, "gibson");
        assert_eq!(event.room, "141");
    }

    #[test]
    fn unmatched_location_falls_back_outside_excluded_categories() {
        let r = resolver();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let res = r
                .resolve(&draft("Pickleball", Some("Slaughter Recreation Center"), None), &mut rng)
                .unwrap();
            let Resolution::Resolved { event, tier, confidence } = res else {
                panic!("expected resolved event");
            };
            assert_eq!(tier, MatchTier::NoMatch);
            assert_eq!(confidence, 0.0);
            assert_ne!(event.building_id, "dorm");
        }
    }

    #[test]
    fn missing_location_is_random_fallback() {
        let r = resolver();
        let mut rng = StdRng::seed_from_u64(5);
        let res = r.resolve(&draft("Mixer", None, None), &mut rng).unwrap();
        assert!(matches!(
            res,
            Resolution::Resolved { tier: MatchTier::NoMatch, .. }
        ));
    }

    #[test]
    fn drafts_without_date_or_title_are_skipped() {
        let r = resolver();
        let mut rng = StdRng::seed_from_u64(5);

        let mut undated = draft("Mixer", Some("Nau"), None);
        undated.date = None;
        assert_eq!(
            r.resolve(&undated, &mut rng).unwrap(),
            Resolution::Skipped(SkipReason::MissingDate)
        );

        let untitled = draft("  ", Some("Nau"), None);
        assert_eq!(
            r.resolve(&untitled, &mut rng).unwrap(),
            Resolution::Skipped(SkipReason::MissingTitle)
        );
    }

    #[test]
    fn rooms_grouped_by_building() {
        let r = resolver();
        assert_eq!(r.rooms_for("nau").len(), 1);
        assert!(r.rooms_for("gibson").is_empty());
        assert_eq!(r.buildings().len(), 3);
        assert_eq!(r.room_count(), 1);
    }
}
