//! Room choice, random building fallback, and link slot classification.

use campusevents_shared::{BuildingRecord, CampusEventsError, CustomLink, Result, RoomRecord};
use rand::Rng;

/// Label attached to links that do not fit a fixed slot.
pub const CUSTOM_LINK_LABEL: &str = "Event Link";

/// Inclusive range for synthesized `Room N` placeholders.
pub const PLACEHOLDER_ROOMS: std::ops::RangeInclusive<u32> = 100..=399;

const SOCIAL_MARKER: &str = "instagram.com";
const REGISTRATION_MARKERS: &[&str] = &["doorlist", "eventbrite"];

/// Pick a building uniformly at random, skipping excluded categories.
///
/// If the exclusion leaves nothing, the whole catalog is used instead. An
/// empty catalog is an error.
pub fn random_building<'a, R: Rng + ?Sized>(
    buildings: &'a [BuildingRecord],
    exclude_categories: &[String],
    rng: &mut R,
) -> Result<&'a BuildingRecord> {
    if buildings.is_empty() {
        return Err(CampusEventsError::catalog(
            "no buildings available for random fallback",
        ));
    }

    let eligible: Vec<&BuildingRecord> = buildings
        .iter()
        .filter(|b| !exclude_categories.contains(&b.category))
        .collect();

    if eligible.is_empty() {
        return Ok(&buildings[rng.random_range(0..buildings.len())]);
    }
    Ok(eligible[rng.random_range(0..eligible.len())])
}

/// Choose a room: a random known room, else the extracted room, else a
/// `Room N` placeholder.
pub fn choose_room<R: Rng + ?Sized>(
    rooms: &[RoomRecord],
    extracted_room: Option<&str>,
    rng: &mut R,
) -> String {
    if !rooms.is_empty() {
        return rooms[rng.random_range(0..rooms.len())].room_name.clone();
    }
    if let Some(room) = extracted_room.map(str::trim).filter(|r| !r.is_empty()) {
        return room.to_string();
    }
    format!("Room {}", rng.random_range(PLACEHOLDER_ROOMS))
}

/// An event's links sorted into the fixed slots plus overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSlots {
    pub instagram: Option<String>,
    pub doorlist: Option<String>,
    pub website: Option<String>,
    pub custom: Vec<CustomLink>,
}

fn is_registration(link: &str) -> bool {
    let lower = link.to_lowercase();
    REGISTRATION_MARKERS.iter().any(|m| lower.contains(m))
}

/// Sort links into slots in a single ordered pass. Each slot takes the
/// first link that qualifies. Social and registration links never fill the
/// website slot; the website slot takes the first plain link. Everything
/// else overflows in order.
pub fn classify_links(links: &[String]) -> LinkSlots {
    let mut slots = LinkSlots::default();

    for link in links {
        let slot = if link.contains(SOCIAL_MARKER) {
            &mut slots.instagram
        } else if is_registration(link) {
            &mut slots.doorlist
        } else {
            &mut slots.website
        };

        if slot.is_none() {
            *slot = Some(link.clone());
        } else {
            slots.custom.push(CustomLink {
                name: CUSTOM_LINK_LABEL.to_string(),
                url: link.clone(),
            });
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn building(id: &str, category: &str) -> BuildingRecord {
        BuildingRecord {
            id: id.into(),
            name: format!("{id} Hall"),
            category: category.into(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn room(building_id: &str, name: &str) -> RoomRecord {
        RoomRecord {
            building_id: building_id.into(),
            room_name: name.into(),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn links_fill_each_slot_once() {
        let slots = classify_links(&strings(&[
            "https://instagram.com/x",
            "https://eventbrite.com/y",
            "https://club.org",
        ]));
        assert_eq!(slots.instagram.as_deref(), Some("https://instagram.com/x"));
        assert_eq!(slots.doorlist.as_deref(), Some("https://eventbrite.com/y"));
        assert_eq!(slots.website.as_deref(), Some("https://club.org"));
        assert!(slots.custom.is_empty());
    }

    #[test]
    fn extra_links_overflow_in_order() {
        let slots = classify_links(&strings(&[
            "https://club.org",
            "https://instagram.com/a",
            "https://instagram.com/b",
            "https://DoorList.app/rsvp",
            "https://club.org/more",
        ]));
        assert_eq!(slots.website.as_deref(), Some("https://club.org"));
        assert_eq!(slots.instagram.as_deref(), Some("https://instagram.com/a"));
        assert_eq!(slots.doorlist.as_deref(), Some("https://DoorList.app/rsvp"));
        assert_eq!(
            slots.custom,
            vec![
                CustomLink {
                    name: CUSTOM_LINK_LABEL.into(),
                    url: "https://instagram.com/b".into(),
                },
                CustomLink {
                    name: CUSTOM_LINK_LABEL.into(),
                    url: "https://club.org/more".into(),
                },
            ]
        );
    }

    #[test]
    fn marked_links_never_become_website() {
        let slots = classify_links(&strings(&[
            "https://instagram.com/a",
            "https://instagram.com/b",
            "https://eventbrite.com/x",
            "https://eventbrite.com/y",
        ]));
        assert_eq!(slots.instagram.as_deref(), Some("https://instagram.com/a"));
        assert_eq!(slots.doorlist.as_deref(), Some("https://eventbrite.com/x"));
        assert!(slots.website.is_none());
        let overflow: Vec<&str> = slots.custom.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            overflow,
            vec!["https://instagram.com/b", "https://eventbrite.com/y"]
        );
    }

    #[test]
    fn no_links_no_slots() {
        assert_eq!(classify_links(&[]), LinkSlots::default());
    }

    #[test]
    fn known_rooms_take_priority() {
        let mut rng = StdRng::seed_from_u64(7);
        let rooms = [room("b1", "Nau 101"), room("b1", "Nau 211")];
        for _ in 0..20 {
            let chosen = choose_room(&rooms, Some("Hall 101"), &mut rng);
            assert!(chosen == "Nau 101" || chosen == "Nau 211");
        }
    }

    #[test]
    fn extracted_room_used_without_known_rooms() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_room(&[], Some(" 141 "), &mut rng), "141");
    }

    #[test]
    fn placeholder_room_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let chosen = choose_room(&[], None, &mut rng);
            let number: u32 = chosen
                .strip_prefix("Room ")
                .and_then(|n| n.parse().ok())
                .expect("placeholder format");
            assert!(PLACEHOLDER_ROOMS.contains(&number));
        }
        // blank extracted room counts as absent
        assert!(choose_room(&[], Some("  "), &mut rng).starts_with("Room "));
    }

    #[test]
    fn seeded_choices_are_reproducible() {
        let a = choose_room(&[], None, &mut StdRng::seed_from_u64(99));
        let b = choose_room(&[], None, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn random_building_respects_exclusions() {
        let buildings = [
            building("dorm", "Residence"),
            building("lab", "Academic"),
            building("dorm2", "Residence"),
        ];
        let exclude = vec!["Residence".to_string()];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let chosen = random_building(&buildings, &exclude, &mut rng).unwrap();
            assert_eq!(chosen.id, "lab");
        }
    }

    #[test]
    fn exclusion_that_empties_catalog_is_ignored() {
        let buildings = [building("dorm", "Residence")];
        let exclude = vec!["Residence".to_string()];
        let mut rng = StdRng::seed_from_u64(1);
        let chosen = random_building(&buildings, &exclude, &mut rng).unwrap();
        assert_eq!(chosen.id, "dorm");
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_building(&[], &[], &mut rng).unwrap_err();
        assert!(matches!(err, CampusEventsError::Catalog { .. }));
    }
}
