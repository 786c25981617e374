//! Extraction of scoring [`Profile`]s from records.
//!
//! The scorer only ever sees `Profile`s. Each record type knows how to
//! describe itself as one; range checks and budget parsing live here so the
//! scorer can assume well-formed input.

use serde_json::Value;

use crate::{
    api::{LifestyleRecord, UserRecord},
    corrections::{correct_gender, correct_gender_preference, LifestyleFactor},
    normalize::{
        coerce::{as_object, to_number, to_text},
        NormalizedListing,
    },
    Academic, Lifestyle, Profile,
};

pub trait ProfileSource {
    fn to_profile(&self) -> Profile;
}

impl ProfileSource for Profile {
    fn to_profile(&self) -> Profile {
        self.clone()
    }
}

/// Either side of a match.
#[derive(Debug, Clone, Copy)]
pub enum Party<'a> {
    Roommate(&'a UserRecord),
    Listing(&'a NormalizedListing),
}

impl ProfileSource for Party<'_> {
    fn to_profile(&self) -> Profile {
        match self {
            Party::Roommate(user) => user.to_profile(),
            Party::Listing(listing) => listing.to_profile(),
        }
    }
}

impl ProfileSource for UserRecord {
    fn to_profile(&self) -> Profile {
        let (budget_min, budget_max) = user_budget(self);
        let preferences = self.preferences.as_ref();

        let location = to_text(self.location.as_ref())
            .or_else(|| preferences.and_then(|p| to_text(p.location.as_ref())));

        let sources: Vec<&LifestyleRecord> = [
            preferences.and_then(|p| p.lifestyle.as_ref()),
            self.lifestyle.as_ref(),
            preferences.map(|p| &p.flat_lifestyle),
        ]
        .into_iter()
        .flatten()
        .collect();
        let label = |factor| first_label(&sources, factor);

        Profile {
            budget_min,
            budget_max,
            location,
            lifestyle: Lifestyle {
                smoking: label(LifestyleFactor::Smoking),
                cleanliness: label(LifestyleFactor::Cleanliness),
                sleep_schedule: label(LifestyleFactor::SleepSchedule),
                study_habits: label(LifestyleFactor::StudyHabits),
                social: label(LifestyleFactor::Social),
            },
            academic: Academic {
                college: to_text(self.college.as_ref()),
                course: to_text(self.course.as_ref()),
                year: to_text(self.year.as_ref()),
            },
            gender: to_text(self.gender.as_ref()).and_then(|raw| correct_gender(&raw)),
            gender_preference: preferences
                .and_then(|p| to_text(p.gender.as_ref()))
                .and_then(|raw| correct_gender_preference(&raw)),
        }
    }
}

impl ProfileSource for NormalizedListing {
    fn to_profile(&self) -> Profile {
        let tiers = &self.pricing.tiers;
        let (budget_min, budget_max) = match (tiers.min_rent(), tiers.max_rent()) {
            (Some(min), Some(max)) => (Some(min), Some(max)),
            _ => {
                let price = positive(self.pricing.starting_price);
                (price, price)
            }
        };

        let preferences = self.preferences;
        let location = Some(self.address.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Profile {
            budget_min,
            budget_max,
            location,
            lifestyle: Lifestyle {
                smoking: (!preferences.smoking).then(|| "Non-smoker".to_string()),
                ..Lifestyle::default()
            },
            academic: Academic::default(),
            gender: Some(preferences.gender.as_gender()),
            gender_preference: Some(preferences.gender),
        }
    }
}

/// `(min, max)` from the `budget` object, a `"min-max"` string, or the flat
/// `budgetMin`/`budgetMax` fields. Non-positive bounds count as absent and
/// an inverted pair is swapped.
pub fn user_budget(user: &UserRecord) -> (Option<f64>, Option<f64>) {
    let (mut min, mut max) = user
        .budget
        .as_ref()
        .map(parse_budget)
        .unwrap_or((None, None));

    min = min.or_else(|| to_number(user.budget_min.as_ref()).and_then(positive));
    max = max.or_else(|| to_number(user.budget_max.as_ref()).and_then(positive));

    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
        bounds => bounds,
    }
}

fn parse_budget(value: &Value) -> (Option<f64>, Option<f64>) {
    if let Some(map) = as_object(Some(value)) {
        return (
            to_number(map.get("min")).and_then(positive),
            to_number(map.get("max")).and_then(positive),
        );
    }

    match value {
        Value::String(raw) => match raw.split_once('-') {
            Some((lo, hi)) => (parse_amount(lo), parse_amount(hi)),
            None => {
                let point = parse_amount(raw);
                (point, point)
            }
        },
        Value::Number(_) => {
            let point = to_number(Some(value)).and_then(positive);
            (point, point)
        }
        _ => (None, None),
    }
}

// "₹8,000 " → 8000
fn parse_amount(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok().and_then(positive)
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn first_label(sources: &[&LifestyleRecord], factor: LifestyleFactor) -> Option<String> {
    sources.iter().find_map(|record| {
        let value = match factor {
            LifestyleFactor::Smoking => &record.smoking,
            LifestyleFactor::Cleanliness => &record.cleanliness,
            LifestyleFactor::SleepSchedule => &record.sleep_schedule,
            LifestyleFactor::StudyHabits => &record.study_habits,
            LifestyleFactor::Social => &record.social,
        };
        to_text(value.as_ref())
    })
}
