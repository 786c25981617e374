use crate::corrections::LifestyleFactor;

/// Top-level dimension weights (points out of 100)
pub const COMPATIBILITY_WEIGHTS: Weights = Weights {
    budget: 20.0,
    location: 15.0,
    lifestyle: 35.0,
    academic: 15.0,
    gender: 15.0,
};

/// Lifestyle sub-weights (points out of 100)
pub const LIFESTYLE_WEIGHTS: LifestyleWeights = LifestyleWeights {
    smoking: 25.0,
    cleanliness: 20.0,
    sleep_schedule: 20.0,
    study_habits: 20.0,
    social: 15.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub budget: f64,
    pub location: f64,
    pub lifestyle: f64,
    pub academic: f64,
    pub gender: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.budget + self.location + self.lifestyle + self.academic + self.gender
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifestyleWeights {
    pub smoking: f64,
    pub cleanliness: f64,
    pub sleep_schedule: f64,
    pub study_habits: f64,
    pub social: f64,
}

impl LifestyleWeights {
    pub fn sum(&self) -> f64 {
        self.smoking + self.cleanliness + self.sleep_schedule + self.study_habits + self.social
    }

    pub fn for_factor(&self, factor: LifestyleFactor) -> f64 {
        match factor {
            LifestyleFactor::Smoking => self.smoking,
            LifestyleFactor::Cleanliness => self.cleanliness,
            LifestyleFactor::SleepSchedule => self.sleep_schedule,
            LifestyleFactor::StudyHabits => self.study_habits,
            LifestyleFactor::Social => self.social,
        }
    }
}
