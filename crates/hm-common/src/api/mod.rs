pub mod annotated;
pub mod listing_record;
pub mod user_record;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use annotated::{AnnotatedListing, AnnotatedMatch, MatchStats};
pub use listing_record::ListingRecord;
pub use user_record::{LifestyleRecord, UserPreferences, UserRecord};

pub(crate) use user_record::record_id_text;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid record json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a record array or a `data` array, got {0}")]
    UnexpectedShape(&'static str),
}

/// Decodes a batch export: a bare array, an API envelope `{"data": [...]}`,
/// or a single object (treated as a batch of one).
pub fn decode_records<T: DeserializeOwned>(input: &str) -> Result<Vec<T>, RecordError> {
    let value: Value = serde_json::from_str(input)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(other) => return Err(RecordError::UnexpectedShape(shape_name(&other))),
            None => vec![Value::Object(map)],
        },
        other => return Err(RecordError::UnexpectedShape(shape_name(&other))),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(RecordError::from))
        .collect()
}

/// Decodes exactly one record; an envelope `{"data": {...}}` is unwrapped.
pub fn decode_record<T: DeserializeOwned>(input: &str) -> Result<T, RecordError> {
    let value: Value = serde_json::from_str(input)?;
    let value = match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => return Err(RecordError::UnexpectedShape(shape_name(&other))),
            None => Value::Object(map),
        },
        other => return Err(RecordError::UnexpectedShape(shape_name(&other))),
    };
    Ok(serde_json::from_value(value)?)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
