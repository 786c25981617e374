use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Gender as entered on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenderPreference {
    Male,
    Female,
    #[default]
    Any,
}

impl GenderPreference {
    pub fn accepts(self, gender: Gender) -> bool {
        match self {
            GenderPreference::Any => true,
            GenderPreference::Male => gender == Gender::Male,
            GenderPreference::Female => gender == Gender::Female,
        }
    }

    /// Gender a listing "presents as" when it restricts its tenants.
    pub fn as_gender(self) -> Gender {
        match self {
            GenderPreference::Male => Gender::Male,
            GenderPreference::Female => Gender::Female,
            GenderPreference::Any => Gender::Other,
        }
    }
}

/// Blank input is `None`; any other unrecognised value is `Other`.
pub fn correct_gender(input: &str) -> Option<Gender> {
    let lowered = input.trim().to_lowercase();
    match lowered.as_str() {
        "" => None,
        "male" | "m" | "man" | "boy" | "boys" => Some(Gender::Male),
        "female" | "f" | "woman" | "girl" | "girls" => Some(Gender::Female),
        _ => Some(Gender::Other),
    }
}

/// Unrecognised preferences are `None` (not `Any`).
pub fn correct_gender_preference(input: &str) -> Option<GenderPreference> {
    let lowered = input.trim().to_lowercase();
    match lowered.as_str() {
        "any" | "either" | "both" | "no preference" | "co-ed" | "coed" => {
            Some(GenderPreference::Any)
        }
        "male" | "m" | "boys" | "boys only" => Some(GenderPreference::Male),
        "female" | "f" | "girls" | "girls only" => Some(GenderPreference::Female),
        _ => None,
    }
}
