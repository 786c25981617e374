use std::collections::HashMap;

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use strum::{AsRefStr, EnumIter};

/// Lifestyle factors compared between two profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum LifestyleFactor {
    Smoking,
    Cleanliness,
    SleepSchedule,
    StudyHabits,
    Social,
}

/// Ordered labels; adjacent entries are considered closer than the ends.
pub const SMOKING_LABELS: [&str; 3] = ["Non-smoker", "Occasional smoker", "Regular smoker"];
pub const CLEANLINESS_LABELS: [&str; 3] = ["Very clean", "Moderately clean", "Casual"];
pub const SLEEP_SCHEDULE_LABELS: [&str; 3] = ["Early bird", "Night owl", "Flexible"];
pub const STUDY_HABITS_LABELS: [&str; 3] = ["Study focused", "Balanced", "Social focused"];
pub const SOCIAL_LABELS: [&str; 3] = ["Very social", "Moderately social", "Quiet/Private"];

impl LifestyleFactor {
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            LifestyleFactor::Smoking => &SMOKING_LABELS,
            LifestyleFactor::Cleanliness => &CLEANLINESS_LABELS,
            LifestyleFactor::SleepSchedule => &SLEEP_SCHEDULE_LABELS,
            LifestyleFactor::StudyHabits => &STUDY_HABITS_LABELS,
            LifestyleFactor::Social => &SOCIAL_LABELS,
        }
    }
}

// "Early bird (6 AM - 10 PM)" → "early bird"
static RE_TRAILING_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

lazy_static! {
    /// Spellings seen in older profiles → canonical label
    static ref LABEL_ALIASES: HashMap<LifestyleFactor, HashMap<&'static str, &'static str>> = {
        let mut m = HashMap::new();
        m.insert(
            LifestyleFactor::Smoking,
            HashMap::from([
                ("non smoker", "Non-smoker"),
                ("nonsmoker", "Non-smoker"),
                ("no", "Non-smoker"),
                ("occasional", "Occasional smoker"),
                ("occasionally", "Occasional smoker"),
                ("regular", "Regular smoker"),
                ("smoker", "Regular smoker"),
            ]),
        );
        m.insert(
            LifestyleFactor::Cleanliness,
            HashMap::from([
                ("very tidy", "Very clean"),
                ("moderate", "Moderately clean"),
                ("relaxed", "Casual"),
            ]),
        );
        m.insert(
            LifestyleFactor::SleepSchedule,
            HashMap::from([
                ("early riser", "Early bird"),
                ("early-bird", "Early bird"),
                ("night-owl", "Night owl"),
            ]),
        );
        m.insert(
            LifestyleFactor::StudyHabits,
            HashMap::from([("focused", "Study focused"), ("studious", "Study focused")]),
        );
        m.insert(
            LifestyleFactor::Social,
            HashMap::from([
                ("social", "Very social"),
                ("moderate", "Moderately social"),
                ("quiet", "Quiet/Private"),
                ("private", "Quiet/Private"),
            ]),
        );
        m
    };
}

/// Maps a raw label onto the factor's canonical label (case-insensitive).
/// Returns `None` for blank or unrecognised input.
pub fn correct_lifestyle_label(factor: LifestyleFactor, input: &str) -> Option<&'static str> {
    let lowered = input.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let bare = RE_TRAILING_HINT.replace(&lowered, "");
    let bare = bare.trim();

    factor
        .labels()
        .iter()
        .find(|label| label.to_lowercase() == bare)
        .copied()
        .or_else(|| {
            LABEL_ALIASES
                .get(&factor)
                .and_then(|aliases| aliases.get(bare))
                .copied()
        })
}

/// Position of the label in the factor's ordered list.
pub fn lifestyle_level(factor: LifestyleFactor, input: &str) -> Option<usize> {
    let label = correct_lifestyle_label(factor, input)?;
    factor.labels().iter().position(|candidate| *candidate == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_factor_has_three_ordered_labels() {
        for factor in LifestyleFactor::iter() {
            assert_eq!(factor.labels().len(), 3, "{}", factor.as_ref());
        }
    }

    #[test]
    fn corrects_case_and_time_hints() {
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::Smoking, "non-SMOKER"),
            Some("Non-smoker")
        );
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::SleepSchedule, "Early bird (6 AM - 10 PM)"),
            Some("Early bird")
        );
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::SleepSchedule, "Night owl (10 PM - 2 AM)"),
            Some("Night owl")
        );
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::Social, "quiet/private"),
            Some("Quiet/Private")
        );
    }

    #[test]
    fn accepts_aliases_per_factor() {
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::Social, "quiet"),
            Some("Quiet/Private")
        );
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::Cleanliness, "moderate"),
            Some("Moderately clean")
        );
        assert_eq!(correct_lifestyle_label(LifestyleFactor::Smoking, "quiet"), None);
    }

    #[test]
    fn unknown_or_blank_labels_are_none() {
        assert_eq!(correct_lifestyle_label(LifestyleFactor::StudyHabits, "  "), None);
        assert_eq!(
            correct_lifestyle_label(LifestyleFactor::StudyHabits, "Party every night"),
            None
        );
        assert_eq!(lifestyle_level(LifestyleFactor::Cleanliness, "Spotless"), None);
    }

    #[test]
    fn levels_follow_label_order() {
        assert_eq!(lifestyle_level(LifestyleFactor::Smoking, "Non-smoker"), Some(0));
        assert_eq!(lifestyle_level(LifestyleFactor::Smoking, "occasional smoker"), Some(1));
        assert_eq!(lifestyle_level(LifestyleFactor::Smoking, "Regular smoker"), Some(2));
        assert_eq!(lifestyle_level(LifestyleFactor::SleepSchedule, "Flexible"), Some(2));
    }
}
