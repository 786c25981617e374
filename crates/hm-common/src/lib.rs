pub mod api;
pub mod corrections;
pub mod logging;
pub mod matching;
pub mod normalize;

use corrections::{Gender, GenderPreference, LifestyleFactor};

/// Scoring view of either side of a match (a student or a listing).
///
/// Every field is optional; the scorer substitutes neutral defaults for
/// anything missing. Build one directly or through
/// [`matching::adapter::ProfileSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub location: Option<String>,
    pub lifestyle: Lifestyle,
    pub academic: Academic,
    pub gender: Option<Gender>,
    pub gender_preference: Option<GenderPreference>,
}

/// Raw lifestyle labels as entered on the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifestyle {
    pub smoking: Option<String>,
    pub cleanliness: Option<String>,
    pub sleep_schedule: Option<String>,
    pub study_habits: Option<String>,
    pub social: Option<String>,
}

impl Lifestyle {
    pub fn get(&self, factor: LifestyleFactor) -> Option<&str> {
        let value = match factor {
            LifestyleFactor::Smoking => &self.smoking,
            LifestyleFactor::Cleanliness => &self.cleanliness,
            LifestyleFactor::SleepSchedule => &self.sleep_schedule,
            LifestyleFactor::StudyHabits => &self.study_habits,
            LifestyleFactor::Social => &self.social,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Academic {
    pub college: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
}
