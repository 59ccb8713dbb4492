//! Store configuration.
//!
//! Values are read through a lookup function rather than straight from the
//! environment, so the browser build (values baked in at compile time) and the
//! native tests share the same validation.

use std::fmt;

use crate::error::ConfigError;
use crate::search::SearchScript;

pub const ENDPOINT_KEY: &str = "COLLECTION_STORE_ENDPOINT";
pub const DOCUMENT_ID_KEY: &str = "COLLECTION_ID";
pub const MASTER_KEY_KEY: &str = "COLLECTION_MASTER_KEY";
pub const ACCESS_KEY_KEY: &str = "COLLECTION_ACCESS_KEY";
pub const TIMEOUT_KEY: &str = "COLLECTION_TIMEOUT_MS";
pub const SEARCH_SCRIPT_KEY: &str = "COLLECTION_SEARCH_SCRIPT";

pub const DEFAULT_TIMEOUT_MILLIS: u32 = 10_000;

/// Everything the store client needs, validated once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint: String,
    pub document_id: String,
    pub master_key: String,
    pub access_key: String,
    pub timeout_millis: u32,
}

/// Application settings: the store plus the search input transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub search_script: SearchScript,
}

impl StoreConfig {
    /// Builds and validates a configuration from `lookup`, which maps a key
    /// such as [`DOCUMENT_ID_KEY`] to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = required(&lookup, ENDPOINT_KEY)?
            .trim_end_matches('/')
            .to_string();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: ENDPOINT_KEY,
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let document_id = required(&lookup, DOCUMENT_ID_KEY)?;
        if document_id.contains('/') {
            return Err(ConfigError::Invalid {
                field: DOCUMENT_ID_KEY,
                reason: "must not contain '/'".to_string(),
            });
        }

        let timeout_millis = match optional(&lookup, TIMEOUT_KEY) {
            None => DEFAULT_TIMEOUT_MILLIS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(millis) if millis > 0 => millis,
                _ => {
                    return Err(ConfigError::Invalid {
                        field: TIMEOUT_KEY,
                        reason: format!("expected a positive number of milliseconds, got {raw:?}"),
                    });
                }
            },
        };

        Ok(StoreConfig {
            endpoint,
            document_id,
            master_key: required(&lookup, MASTER_KEY_KEY)?,
            access_key: required(&lookup, ACCESS_KEY_KEY)?,
            timeout_millis,
        })
    }

    /// URL of the single document holding the collection.
    pub fn document_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.document_id)
    }
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let search_script = match optional(&lookup, SEARCH_SCRIPT_KEY) {
            None => SearchScript::default(),
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                field: SEARCH_SCRIPT_KEY,
                reason,
            })?,
        };
        Ok(AppConfig {
            store: StoreConfig::from_lookup(&lookup)?,
            search_script,
        })
    }
}

/// Only the timeout is printed. The endpoint and document id locate the
/// collection, so they are kept out of logs along with the keys.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &"<redacted>")
            .field("document_id", &"<redacted>")
            .field("master_key", &"<redacted>")
            .field("access_key", &"<redacted>")
            .field("timeout_millis", &self.timeout_millis)
            .finish()
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}
