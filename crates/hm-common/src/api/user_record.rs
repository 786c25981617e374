use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::normalize::coerce::{as_object, to_text};

/// Student document as exported by the persistence layer.
///
/// Lifestyle labels have lived in three places over time:
/// `preferences.lifestyle`, a top-level `lifestyle`, and flat under
/// `preferences`. All three are read, in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    /// `{min, max}` object, or a `"8000-12000"` range string from the signup form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "embedded_object")]
    pub preferences: Option<UserPreferences>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "embedded_object")]
    pub lifestyle: Option<LifestyleRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    /// Passed through untouched (name, avatar, contact, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "embedded_object")]
    pub lifestyle: Option<LifestyleRecord>,
    #[serde(flatten)]
    pub flat_lifestyle: LifestyleRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifestyleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoking: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_schedule: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_habits: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<Value>,
}

impl UserRecord {
    /// `_id` as text; Mongo extended JSON (`{"$oid": ...}`) is unwrapped.
    pub fn id_text(&self) -> Option<String> {
        record_id_text(self.id.as_ref())
    }

    pub fn role_text(&self) -> Option<String> {
        to_text(self.role.as_ref())
    }
}

/// Objects, JSON-encoded objects, or nothing; other shapes are dropped
/// rather than failing the whole record.
fn embedded_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(as_object(raw.as_ref()).and_then(|map| serde_json::from_value(Value::Object(map)).ok()))
}

pub(crate) fn record_id_text(id: Option<&Value>) -> Option<String> {
    match id? {
        Value::Object(map) => to_text(map.get("$oid")),
        other => to_text(Some(other)),
    }
}
