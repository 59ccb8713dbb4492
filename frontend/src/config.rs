//! Build-time configuration.
//!
//! A browser has no process environment, so the values are captured from the
//! environment of the `trunk build` that produced the bundle.

use common::config::{
    AppConfig, ACCESS_KEY_KEY, DOCUMENT_ID_KEY, ENDPOINT_KEY, MASTER_KEY_KEY, SEARCH_SCRIPT_KEY,
    TIMEOUT_KEY,
};
use common::error::ConfigError;
use log::LevelFilter;

fn build_time_value(key: &str) -> Option<String> {
    let value = match key {
        ENDPOINT_KEY => option_env!("COLLECTION_STORE_ENDPOINT"),
        DOCUMENT_ID_KEY => option_env!("COLLECTION_ID"),
        MASTER_KEY_KEY => option_env!("COLLECTION_MASTER_KEY"),
        ACCESS_KEY_KEY => option_env!("COLLECTION_ACCESS_KEY"),
        TIMEOUT_KEY => option_env!("COLLECTION_TIMEOUT_MS"),
        SEARCH_SCRIPT_KEY => option_env!("COLLECTION_SEARCH_SCRIPT"),
        _ => None,
    };
    value.map(str::to_string)
}

pub fn load() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(build_time_value)
}

pub fn log_level() -> LevelFilter {
    option_env!("COLLECTION_LOG_LEVEL")
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}
