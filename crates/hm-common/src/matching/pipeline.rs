use std::collections::BTreeMap;

use tracing::debug;

use super::{
    adapter::ProfileSource,
    label::LabelConfig,
    prefilter::{ListingFilter, RejectReason, RoommateFilter},
    scoring::{CompatibilityEngine, MatchingConfig},
};
use crate::{
    api::{AnnotatedListing, AnnotatedMatch, ListingRecord, MatchStats, UserRecord},
    normalize::{normalize_listing, NormalizedListing},
    Profile,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngineConfig {
    pub matching: MatchingConfig,
    pub labels: LabelConfig,
}

/// Filter, score and order candidates for one searching student.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    scorer: CompatibilityEngine,
    labels: LabelConfig,
}

impl RankingEngine {
    pub fn new(config: RankingEngineConfig) -> Self {
        Self {
            scorer: CompatibilityEngine::new(config.matching),
            labels: config.labels,
        }
    }

    pub fn scorer(&self) -> &CompatibilityEngine {
        &self.scorer
    }

    /// Roommate candidates passing the user's hard constraints, best first.
    /// Equal scores keep their input order.
    pub fn rank_roommates(&self, user: &UserRecord, candidates: &[UserRecord]) -> Vec<AnnotatedMatch> {
        let filter = RoommateFilter::from_user(user);
        let profile = user.to_profile();
        let mut dropped = DropCounter::default();

        let mut ranked: Vec<AnnotatedMatch> = candidates
            .iter()
            .filter(|candidate| dropped.keep(filter.evaluate(candidate)))
            .map(|candidate| AnnotatedMatch {
                compatibility: self.compatibility(&profile, candidate),
                user: candidate.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));

        debug!(
            candidates = candidates.len(),
            kept = ranked.len(),
            dropped = ?dropped.by_reason,
            "ranked roommate candidates"
        );
        ranked
    }

    pub fn annotate_listing(&self, profile: &Profile, listing: NormalizedListing) -> AnnotatedListing {
        let compatibility = self.compatibility(profile, &listing);
        AnnotatedListing {
            compatibility_label: self.labels.label_for(compatibility),
            compatibility,
            listing,
        }
    }

    /// Normalizes every record, applies `filter`, and orders by compatibility
    /// with `user`.
    pub fn annotate_listings(
        &self,
        user: &UserRecord,
        records: &[ListingRecord],
        filter: &ListingFilter,
    ) -> Vec<AnnotatedListing> {
        let profile = user.to_profile();
        let mut dropped = DropCounter::default();

        let mut annotated: Vec<AnnotatedListing> = records
            .iter()
            .map(normalize_listing)
            .filter(|listing| dropped.keep(filter.evaluate(listing)))
            .map(|listing| self.annotate_listing(&profile, listing))
            .collect();

        annotated.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));

        debug!(
            listings = records.len(),
            kept = annotated.len(),
            dropped = ?dropped.by_reason,
            "annotated listings"
        );
        annotated
    }

    fn compatibility(&self, profile: &Profile, other: &impl ProfileSource) -> u8 {
        self.scorer
            .calculate_match_score(profile, &other.to_profile())
            .compatibility()
    }
}

pub fn match_stats(matches: &[AnnotatedMatch]) -> MatchStats {
    MatchStats::from_scores(matches.iter().map(|m| m.compatibility))
}

#[derive(Debug, Default)]
struct DropCounter {
    by_reason: BTreeMap<&'static str, usize>,
}

impl DropCounter {
    fn keep(&mut self, verdict: Result<(), RejectReason>) -> bool {
        match verdict {
            Ok(()) => true,
            Err(reason) => {
                let key: &'static str = reason.into();
                *self.by_reason.entry(key).or_default() += 1;
                false
            }
        }
    }
}
