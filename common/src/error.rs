use thiserror::Error;

use crate::model::collection::CardId;
use crate::sync::state::SyncState;

/// Failures talking to the remote document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("store responded with status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request timed out after {millis} ms")]
    Timeout { millis: u32 },

    #[error("could not encode collection: {0}")]
    Encode(String),
}

/// Invalid or incomplete store configuration. Never carries secret values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration value {0}")]
    Missing(&'static str),

    #[error("invalid configuration value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rejected view-model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("busy: collection is {0}")]
    Busy(SyncState),

    #[error("no card with id {0}")]
    UnknownCard(CardId),

    #[error(transparent)]
    Store(#[from] StoreError),
}
