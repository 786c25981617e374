use serde::{Deserialize, Serialize};

use super::UserRecord;
use crate::matching::label::CompatibilityLabel;
use crate::normalize::NormalizedListing;

/// Normalized listing as shown to a browsing student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedListing {
    #[serde(flatten)]
    pub listing: NormalizedListing,
    /// 0-100
    pub compatibility: u8,
    pub compatibility_label: CompatibilityLabel,
}

/// Candidate roommate record with its score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedMatch {
    #[serde(flatten)]
    pub user: UserRecord,
    pub compatibility: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub total_matches: usize,
    /// compatibility >= 80
    pub high: usize,
    /// 60..=79
    pub moderate: usize,
    /// < 60
    pub low: usize,
}

impl MatchStats {
    pub fn from_scores(scores: impl IntoIterator<Item = u8>) -> Self {
        scores.into_iter().fold(Self::default(), |mut stats, score| {
            stats.total_matches += 1;
            match score {
                80..=u8::MAX => stats.high += 1,
                60..=79 => stats.moderate += 1,
                _ => stats.low += 1,
            }
            stats
        })
    }
}
