//! Rent/listing normalization.
//!
//! Turns a [`ListingRecord`] in any historical shape into a
//! [`NormalizedListing`]. Resolution happens once, here; nothing downstream
//! inspects raw shapes again. Normalization never fails and is idempotent:
//! a serialized `NormalizedListing` fed back in produces the same value.

pub mod amenities;
pub mod coerce;
pub mod rents;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::AsRefStr;

use crate::api::{record_id_text, ListingRecord};
use crate::corrections::{correct_gender_preference, GenderPreference};

pub use amenities::normalize_amenities;
pub use rents::{
    derive_pricing, normalize_rents, LegacyPricing, ListingPricing, RawTierValue, RentTier,
    RentTiers, Tier,
};

use coerce::{as_object, to_amount, to_count, to_flag, to_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomType {
    Single,
    Shared,
    Apartment,
}

impl RoomType {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "single" => Some(RoomType::Single),
            "shared" => Some(RoomType::Shared),
            "apartment" => Some(RoomType::Apartment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
pub enum FoodPreference {
    #[serde(rename = "veg")]
    #[strum(serialize = "veg")]
    Veg,
    #[serde(rename = "non-veg")]
    #[strum(serialize = "non-veg")]
    NonVeg,
    #[default]
    #[serde(rename = "any")]
    #[strum(serialize = "any")]
    Any,
}

impl FoodPreference {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "veg" | "vegetarian" => Some(FoodPreference::Veg),
            "non-veg" | "nonveg" | "non veg" | "non-vegetarian" => Some(FoodPreference::NonVeg),
            "any" => Some(FoodPreference::Any),
            _ => None,
        }
    }
}

/// House preferences set by the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPreferences {
    pub gender: GenderPreference,
    /// Whether smoking is allowed on the premises
    pub smoking: bool,
    pub pets: bool,
    pub food_preferences: FoodPreference,
}

/// Canonical listing shape handed to the scorer and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedListing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub address: String,
    /// Legacy flat price
    pub price: f64,
    /// Legacy flat vacancy count
    pub available_rooms: u32,
    pub total_rooms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub preferences: ListingPreferences,
    pub house_rules: String,
    pub whats_nearby: String,
    pub furnished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,
    #[serde(flatten)]
    pub pricing: ListingPricing,
}

impl NormalizedListing {
    /// Any tier (or the legacy counter) reports a vacancy.
    pub fn has_vacancy(&self) -> bool {
        self.pricing.available_rooms_computed > 0
    }
}

pub fn normalize_listing(record: &ListingRecord) -> NormalizedListing {
    let tiers = normalize_rents(record.rents.as_ref());
    let legacy = LegacyPricing {
        price: to_amount(record.price.as_ref(), 0.0),
        available_rooms: to_count(record.available_rooms.as_ref()),
        total_rooms: to_count(record.total_rooms.as_ref()),
    };

    NormalizedListing {
        id: record_id_text(record.id.as_ref()),
        title: text_or_empty(record.title.as_ref()),
        description: text_or_empty(record.description.as_ref()),
        address: text_or_empty(record.address.as_ref()),
        price: legacy.price,
        available_rooms: legacy.available_rooms,
        total_rooms: legacy.total_rooms,
        room_type: to_text(record.room_type.as_ref()).and_then(|raw| RoomType::parse(&raw)),
        amenities: normalize_amenities(record.amenities.as_ref()),
        images: normalize_amenities(record.images.as_ref()),
        preferences: normalize_preferences(record.preferences.as_ref()),
        house_rules: text_or_empty(record.house_rules.as_ref()),
        whats_nearby: text_or_empty(record.whats_nearby.as_ref()),
        furnished: to_flag(record.furnished.as_ref()),
        owner: record.owner.clone(),
        pricing: derive_pricing(tiers, legacy),
    }
}

/// Accepts an object or a JSON-encoded object; unknown values use defaults.
pub fn normalize_preferences(value: Option<&Value>) -> ListingPreferences {
    let Some(map) = as_object(value) else {
        return ListingPreferences::default();
    };

    ListingPreferences {
        gender: to_text(map.get("gender"))
            .and_then(|raw| correct_gender_preference(&raw))
            .unwrap_or_default(),
        smoking: to_flag(map.get("smoking")),
        pets: to_flag(map.get("pets")),
        food_preferences: to_text(map.get("foodPreferences"))
            .and_then(|raw| FoodPreference::parse(&raw))
            .unwrap_or_default(),
    }
}

fn text_or_empty(value: Option<&Value>) -> String {
    to_text(value).unwrap_or_default()
}
