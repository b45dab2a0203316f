//! Building matcher: free-text location → catalog building plus confidence.

use campusevents_shared::BuildingRecord;

use crate::normalize::normalize_building_name;
use crate::similarity::similarity_ratio;

/// Score given when one normalized name contains the other.
pub const CONTAINMENT_SCORE: f64 = 0.95;

/// Lowest score accepted as a match.
pub const MIN_CONFIDENCE: f64 = 0.6;

/// Lowest score reported as a high-confidence match.
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Outcome of matching one location against the catalog.
///
/// `building` is `None` exactly when `confidence` is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub building: Option<&'a BuildingRecord>,
    pub confidence: f64,
}

impl MatchResult<'_> {
    pub fn none() -> Self {
        Self {
            building: None,
            confidence: 0.0,
        }
    }

    pub fn tier(&self) -> MatchTier {
        MatchTier::from_confidence(self.confidence)
    }
}

/// Confidence band used for run reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    High,
    Medium,
    /// Below the acceptance threshold; the event gets a random building.
    NoMatch,
}

impl MatchTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            Self::High
        } else if confidence >= MIN_CONFIDENCE {
            Self::Medium
        } else {
            Self::NoMatch
        }
    }
}

/// Score two already-normalized names.
pub fn score_names(location: &str, building: &str) -> f64 {
    if location.contains(building) || building.contains(location) {
        CONTAINMENT_SCORE
    } else {
        similarity_ratio(location, building)
    }
}

/// Find the best catalog building for `location`.
///
/// Ties keep the earliest building in catalog order. Blank locations and
/// empty catalogs never match.
pub fn match_building<'a>(
    location: Option<&str>,
    catalog: &'a [BuildingRecord],
) -> MatchResult<'a> {
    let Some(location) = location.filter(|l| !l.trim().is_empty()) else {
        return MatchResult::none();
    };
    let normalized = normalize_building_name(location);

    let mut best: Option<&BuildingRecord> = None;
    let mut best_score = 0.0;

    for building in catalog {
        let candidate = normalize_building_name(&building.name);
        if candidate.is_empty() {
            continue;
        }
        let score = score_names(&normalized, &candidate);
        if score > best_score {
            best_score = score;
            best = Some(building);
        }
    }

    match best {
        Some(building) if best_score >= MIN_CONFIDENCE => MatchResult {
            building: Some(building),
            confidence: best_score,
        },
        _ => MatchResult::none(),
    }
}
