use strum::IntoEnumIterator;

use super::{
    location::evaluate_location,
    weights::{LifestyleWeights, Weights, COMPATIBILITY_WEIGHTS, LIFESTYLE_WEIGHTS},
};
use crate::{
    corrections::{correct_lifestyle_label, lifestyle_level, GenderPreference, LifestyleFactor},
    Profile,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    pub weights: Weights,
    pub lifestyle_weights: LifestyleWeights,
    /// Substituted for a missing lower budget bound
    pub default_budget_min: f64,
    /// Substituted for a missing upper budget bound
    pub default_budget_max: f64,
    /// Divisor of the closeness term (default range width)
    pub budget_normalization_span: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: COMPATIBILITY_WEIGHTS,
            lifestyle_weights: LIFESTYLE_WEIGHTS,
            default_budget_min: 5000.0,
            default_budget_max: 20000.0,
            budget_normalization_span: 15000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub score: f64,
    pub max_score: f64,
    pub status: &'static str,
    pub details: String,
}

/// Per-dimension breakdown; `total` is in points (0-100).
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub total: f64,
    pub budget: ScoringResult,
    pub location: ScoringResult,
    pub lifestyle: ScoringResult,
    pub academic: ScoringResult,
    pub gender: ScoringResult,
}

impl MatchScore {
    /// Rounded integer score shown to users.
    pub fn compatibility(&self) -> u8 {
        self.total.round().clamp(0.0, 100.0) as u8
    }
}

/// Compatibility of two profiles with the default weights.
pub fn score(a: &Profile, b: &Profile) -> u8 {
    CompatibilityEngine::default()
        .calculate_match_score(a, b)
        .compatibility()
}

#[derive(Debug, Clone, Default)]
pub struct CompatibilityEngine {
    config: MatchingConfig,
}

impl CompatibilityEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn calculate_match_score(&self, a: &Profile, b: &Profile) -> MatchScore {
        let budget = self.score_budget(a, b);
        let location = self.score_location(a, b);
        let lifestyle = self.score_lifestyle(a, b);
        let academic = self.score_academic(a, b);
        let gender = self.score_gender(a, b);

        let weights = self.config.weights;
        let total = budget.score * weights.budget
            + location.score * weights.location
            + lifestyle.score * weights.lifestyle
            + academic.score * weights.academic
            + gender.score * weights.gender;

        MatchScore {
            total,
            budget,
            location,
            lifestyle,
            academic,
            gender,
        }
    }

    pub fn score_budget(&self, a: &Profile, b: &Profile) -> ScoringResult {
        let (min1, max1) = self.budget_bounds(a);
        let (min2, max2) = self.budget_bounds(b);

        let ov = (max1.min(max2) - min1.max(min2)).max(0.0);
        let overlap = if ov > 0.0 {
            ov / (max1.max(max2) - min1.min(min2))
        } else if point_within(min1, max1, min2, max2) || point_within(min2, max2, min1, max1) {
            // a single price inside the other range
            1.0
        } else {
            0.0
        };

        let span = self.config.budget_normalization_span;
        let distance = (max1 - max2).abs() + (min1 - min2).abs();
        let closeness = if span > 0.0 {
            (1.0 - distance / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let score = 0.7 * overlap + 0.3 * closeness;
        let unknown = a.budget_min.is_none()
            && a.budget_max.is_none()
            && b.budget_min.is_none()
            && b.budget_max.is_none();

        ScoringResult {
            score,
            max_score: 1.0,
            status: status_from_score(score, unknown),
            details: format!(
                "[{min1:.0}, {max1:.0}] vs [{min2:.0}, {max2:.0}]: overlap {overlap:.2}, closeness {closeness:.2}"
            ),
        }
    }

    pub fn score_location(&self, a: &Profile, b: &Profile) -> ScoringResult {
        let evaluation = evaluate_location(a.location.as_deref(), b.location.as_deref());

        ScoringResult {
            score: evaluation.score,
            max_score: 1.0,
            status: status_from_score(evaluation.score, evaluation.is_unknown()),
            details: evaluation.details,
        }
    }

    pub fn score_lifestyle(&self, a: &Profile, b: &Profile) -> ScoringResult {
        let weights = self.config.lifestyle_weights;
        let mut points = 0.0;
        let mut compared = 0usize;
        let mut details = Vec::new();

        for factor in LifestyleFactor::iter() {
            let weight = weights.for_factor(factor);
            let (similarity, note) =
                lifestyle_similarity(factor, a.lifestyle.get(factor), b.lifestyle.get(factor));
            if note != "unknown" {
                compared += 1;
            }
            points += weight * similarity;
            details.push(format!("{}={note}", factor.as_ref()));
        }

        let total_weight = weights.sum();
        let score = if total_weight > 0.0 {
            points / total_weight
        } else {
            0.5
        };

        ScoringResult {
            score,
            max_score: 1.0,
            status: status_from_score(score, compared == 0),
            details: details.join(", "),
        }
    }

    pub fn score_academic(&self, a: &Profile, b: &Profile) -> ScoringResult {
        let pairs = [
            ("college", &a.academic.college, &b.academic.college),
            ("course", &a.academic.course, &b.academic.course),
            ("year", &a.academic.year, &b.academic.year),
        ];

        let mut counter = 0u32;
        let mut matched = 0u32;
        let mut same = Vec::new();
        for (name, left, right) in pairs {
            let (Some(left), Some(right)) = (present(left), present(right)) else {
                continue;
            };
            counter += 1;
            if left.to_lowercase() == right.to_lowercase() {
                matched += 1;
                same.push(name);
            }
        }

        if counter == 0 {
            return ScoringResult {
                score: 0.5,
                max_score: 1.0,
                status: "UNKNOWN",
                details: "no academic field present on both sides; neutral score".into(),
            };
        }

        let score = f64::from(matched) / f64::from(counter);
        ScoringResult {
            score,
            max_score: 1.0,
            status: status_from_score(score, false),
            details: format!("{matched}/{counter} shared ({})", same.join(", ")),
        }
    }

    pub fn score_gender(&self, a: &Profile, b: &Profile) -> ScoringResult {
        let (Some(gender_a), Some(gender_b)) = (a.gender, b.gender) else {
            return ScoringResult {
                score: 0.5,
                max_score: 1.0,
                status: "UNKNOWN",
                details: "gender missing on one side; neutral score".into(),
            };
        };

        let any = Some(GenderPreference::Any);
        let (score, details) = if a.gender_preference == any || b.gender_preference == any {
            (1.0, "open preference".to_string())
        } else {
            match (a.gender_preference, b.gender_preference) {
                (Some(pref_a), Some(pref_b))
                    if pref_a.accepts(gender_b) && pref_b.accepts(gender_a) =>
                {
                    (1.0, "mutual preference".to_string())
                }
                (pref_a, pref_b) => (
                    0.0,
                    format!(
                        "preference mismatch: {}/{} vs {}/{}",
                        gender_a.as_ref(),
                        pref_a.map(|p| p.as_ref().to_string()).unwrap_or_else(|| "none".into()),
                        gender_b.as_ref(),
                        pref_b.map(|p| p.as_ref().to_string()).unwrap_or_else(|| "none".into()),
                    ),
                ),
            }
        };

        ScoringResult {
            score,
            max_score: 1.0,
            status: status_from_score(score, false),
            details,
        }
    }

    fn budget_bounds(&self, profile: &Profile) -> (f64, f64) {
        (
            profile.budget_min.unwrap_or(self.config.default_budget_min),
            profile.budget_max.unwrap_or(self.config.default_budget_max),
        )
    }
}

/// Similarity in 0..=1 plus a short note for the breakdown.
fn lifestyle_similarity(
    factor: LifestyleFactor,
    a: Option<&str>,
    b: Option<&str>,
) -> (f64, &'static str) {
    let (Some(a), Some(b)) = (a, b) else {
        return (0.5, "unknown");
    };

    if a.to_lowercase() == b.to_lowercase() {
        return (1.0, "same");
    }

    let canonical_a = correct_lifestyle_label(factor, a);
    if canonical_a.is_some() && canonical_a == correct_lifestyle_label(factor, b) {
        return (1.0, "same");
    }

    match (lifestyle_level(factor, a), lifestyle_level(factor, b)) {
        (Some(i1), Some(i2)) => {
            let steps = factor.labels().len().saturating_sub(1).max(1) as f64;
            let diff = (i1 as f64 - i2 as f64).abs();
            (1.0 - diff / steps, "ordinal")
        }
        _ => (0.5, "unrecognised"),
    }
}

fn point_within(lo: f64, hi: f64, min: f64, max: f64) -> bool {
    lo == hi && (min..=max).contains(&lo)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn status_from_score(score: f64, unknown: bool) -> &'static str {
    if unknown {
        "UNKNOWN"
    } else if score >= 0.9 {
        "PERFECT_MATCH"
    } else if score >= 0.7 {
        "MATCH"
    } else if score >= 0.4 {
        "PARTIAL_MATCH"
    } else {
        "MISS"
    }
}
