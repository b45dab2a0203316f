//! Run statistics for the population pass.

use std::time::Duration;

use campusevents_resolve::MatchTier;
use serde::Serialize;

/// How each draft's location was resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub high: usize,
    pub medium: usize,
    pub random: usize,
    /// Drafts dropped for missing date or title.
    pub skipped: usize,
}

impl MatchStats {
    pub fn record(&mut self, tier: MatchTier) {
        match tier {
            MatchTier::High => self.high += 1,
            MatchTier::Medium => self.medium += 1,
            MatchTier::NoMatch => self.random += 1,
        }
    }

    /// Drafts that produced a resolved event.
    pub fn resolved(&self) -> usize {
        self.high + self.medium + self.random
    }
}

/// Outcome of handing resolved events to the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsertStats {
    pub inserted: usize,
    pub errors: usize,
    pub processed: usize,
}

/// Summary of one `populate` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PopulateReport {
    pub matches: MatchStats,
    pub inserts: InsertStats,
    #[serde(skip)]
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_map_to_counters() {
        let mut stats = MatchStats::default();
        stats.record(MatchTier::High);
        stats.record(MatchTier::High);
        stats.record(MatchTier::Medium);
        stats.record(MatchTier::NoMatch);
        stats.skipped += 1;

        assert_eq!(
            stats,
            MatchStats {
                high: 2,
                medium: 1,
                random: 1,
                skipped: 1,
            }
        );
        assert_eq!(stats.resolved(), 4);
    }

    #[test]
    fn report_serializes_without_timing() {
        let json = serde_json::to_value(PopulateReport::default()).unwrap();
        assert_eq!(json["matches"]["high"], 0);
        assert_eq!(json["inserts"]["processed"], 0);
        assert!(json.get("elapsed").is_none());
    }
}
