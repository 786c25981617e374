pub mod gender;
pub mod lifestyle;

pub use gender::{correct_gender, correct_gender_preference, Gender, GenderPreference};
pub use lifestyle::{correct_lifestyle_label, lifestyle_level, LifestyleFactor};
