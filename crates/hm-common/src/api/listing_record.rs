use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Listing document as exported by the persistence layer.
///
/// Every field is kept as raw JSON because older clients stored numbers as
/// strings and nested objects as JSON-encoded strings; the normalizer
/// resolves the shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingRecord {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_rooms: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rents: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rooms: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_rules: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whats_nearby: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnished: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,
    /// Fields the core does not interpret (timestamps, geo point, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_mongo_export_shape() {
        let raw = json!({
            "_id": "665f1c",
            "title": "Sunrise PG",
            "price": "9500",
            "availableRooms": 2,
            "rents": "{\"single\":8000}",
            "createdAt": "2024-06-01T10:00:00Z"
        });
        let record: ListingRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(record.id, Some(json!("665f1c")));
        assert_eq!(record.price, Some(json!("9500")));
        assert_eq!(record.available_rooms, Some(json!(2)));
        assert_eq!(record.rents, Some(json!("{\"single\":8000}")));
        assert_eq!(record.extra.get("createdAt"), Some(&json!("2024-06-01T10:00:00Z")));
    }

    #[test]
    fn plain_id_is_accepted() {
        let record: ListingRecord = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(record.id, Some(json!(7)));
    }
}
