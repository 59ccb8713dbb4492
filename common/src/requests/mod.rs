use serde::{Deserialize, Serialize};

use crate::model::collection::Collection;

/// Body returned by the document store for both reads and overwrites.
/// The collection itself travels under `record`.
#[derive(Debug, Deserialize, Serialize)]
pub struct RecordEnvelope {
    pub record: Collection,
}

/// Error body returned by the document store on non-success responses.
#[derive(Debug, Deserialize)]
pub struct StoreErrorBody {
    pub message: String,
}
