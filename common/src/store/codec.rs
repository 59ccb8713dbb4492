use crate::error::StoreError;
use crate::model::collection::Collection;
use crate::requests::{RecordEnvelope, StoreErrorBody};

pub const MASTER_KEY_HEADER: &str = "X-Master-Key";
pub const ACCESS_KEY_HEADER: &str = "X-Access-Key";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Longest slice of a raw error body quoted back in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Serializes the full collection as the pretty-printed body of an overwrite.
pub fn encode_document(collection: &Collection) -> Result<String, StoreError> {
    serde_json::to_string_pretty(collection).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Interprets a store response.
///
/// - 2xx with `{ "record": ... }` yields the collection.
/// - 2xx with anything else is [`StoreError::MalformedResponse`].
/// - Other statuses are [`StoreError::Remote`], carrying the store's own
///   `message` when the body has one.
pub fn decode_record(status: u16, body: &str) -> Result<Collection, StoreError> {
    if !(200..300).contains(&status) {
        return Err(StoreError::Remote {
            status,
            message: remote_message(body),
        });
    }
    serde_json::from_str::<RecordEnvelope>(body)
        .map(|envelope| envelope.record)
        .map_err(|e| StoreError::MalformedResponse(e.to_string()))
}

fn remote_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<StoreErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
