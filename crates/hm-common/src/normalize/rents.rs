use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumIter};

use super::coerce::{to_amount, to_count, to_flag};

/// Nesting allowed for string-encoded tier values ("\"8000\"", "\"{...}\"").
const MAX_DECODE_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Single,
    Double,
    Triple,
}

/// Pricing and vacancy for one room-sharing tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RentTier {
    /// 0 means "not priced"
    pub rent: f64,
    pub available: bool,
    /// Vacant rooms; only meaningful while `available`
    pub count: u32,
}

impl RentTier {
    pub fn vacant_rooms(&self) -> u32 {
        if self.available {
            self.count
        } else {
            0
        }
    }
}

/// A tier value exactly as stored by some client version.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTierValue {
    /// Legacy flat-rent schema
    Number(f64),
    /// Numeric string or JSON-encoded value
    Text(String),
    Object(Map<String, Value>),
    Missing,
}

impl RawTierValue {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(RawTierValue::Number)
                .unwrap_or(RawTierValue::Missing),
            Some(Value::String(s)) => RawTierValue::Text(s.clone()),
            Some(Value::Object(map)) => RawTierValue::Object(map.clone()),
            _ => RawTierValue::Missing,
        }
    }

    pub fn resolve(&self) -> RentTier {
        self.resolve_with_depth(MAX_DECODE_DEPTH)
    }

    fn resolve_with_depth(&self, depth: usize) -> RentTier {
        match self {
            RawTierValue::Object(map) => RentTier {
                rent: to_amount(map.get("rent"), 0.0),
                available: to_flag(map.get("available")),
                count: to_count(map.get("count")),
            },
            RawTierValue::Number(n) => RentTier {
                rent: if n.is_finite() { n.max(0.0) } else { 0.0 },
                ..RentTier::default()
            },
            RawTierValue::Text(text) => resolve_text(text, depth),
            RawTierValue::Missing => RentTier::default(),
        }
    }
}

fn resolve_text(text: &str, depth: usize) -> RentTier {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => RawTierValue::Object(map).resolve_with_depth(depth),
        Ok(Value::Number(n)) => RawTierValue::Number(n.as_f64().unwrap_or(0.0)).resolve(),
        Ok(Value::String(inner)) if depth > 0 => resolve_text(&inner, depth - 1),
        Ok(_) => RentTier::default(),
        Err(_) => text
            .trim()
            .parse::<f64>()
            .map(|n| RawTierValue::Number(n).resolve())
            .unwrap_or_default(),
    }
}

/// The three fixed tiers; serialized as the `rents` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RentTiers {
    pub single: RentTier,
    pub double: RentTier,
    pub triple: RentTier,
}

impl RentTiers {
    pub fn get(&self, tier: Tier) -> &RentTier {
        match tier {
            Tier::Single => &self.single,
            Tier::Double => &self.double,
            Tier::Triple => &self.triple,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &RentTier)> {
        [
            (Tier::Single, &self.single),
            (Tier::Double, &self.double),
            (Tier::Triple, &self.triple),
        ]
        .into_iter()
    }

    /// Lowest positive rent, if any tier is priced.
    pub fn min_rent(&self) -> Option<f64> {
        self.priced().reduce(f64::min)
    }

    /// Highest positive rent, if any tier is priced.
    pub fn max_rent(&self) -> Option<f64> {
        self.priced().reduce(f64::max)
    }

    pub fn vacant_rooms(&self) -> u32 {
        self.iter()
            .fold(0u32, |acc, (_, tier)| acc.saturating_add(tier.vacant_rooms()))
    }

    fn priced(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|(_, tier)| tier.rent).filter(|rent| *rent > 0.0)
    }
}

/// Canonical pricing derived on every read; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPricing {
    #[serde(rename = "rents")]
    pub tiers: RentTiers,
    pub starting_price: f64,
    pub available_rooms_computed: u32,
    pub occupied_rooms: u32,
}

/// Legacy flat fields used when the tiers carry no information.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegacyPricing {
    pub price: f64,
    pub available_rooms: u32,
    pub total_rooms: u32,
}

/// Resolves the `rents` container (object, JSON string, or junk) tier by tier.
pub fn normalize_rents(rents: Option<&Value>) -> RentTiers {
    let container = match rents {
        Some(Value::Object(map)) => Some(map.clone()),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    };

    let tier = |name: Tier| {
        RawTierValue::from_value(container.as_ref().and_then(|map| map.get(name.as_ref())))
            .resolve()
    };

    RentTiers {
        single: tier(Tier::Single),
        double: tier(Tier::Double),
        triple: tier(Tier::Triple),
    }
}

pub fn derive_pricing(tiers: RentTiers, legacy: LegacyPricing) -> ListingPricing {
    let starting_price = tiers.min_rent().unwrap_or(legacy.price);

    let vacant = tiers.vacant_rooms();
    let available_rooms_computed = if vacant > 0 {
        vacant
    } else {
        legacy.available_rooms
    };

    let occupied_rooms = if legacy.total_rooms > 0 {
        legacy.total_rooms.saturating_sub(available_rooms_computed)
    } else {
        0
    };

    ListingPricing {
        tiers,
        starting_price,
        available_rooms_computed,
        occupied_rooms,
    }
}
