//! Properties of the `CollectionComponent`.

use common::config::AppConfig;
use yew::prelude::*;

/// The validated configuration is the only input: it tells the component
/// which document to load and how to transform search input.
#[derive(Properties, PartialEq, Clone)]
pub struct CollectionProps {
    pub config: AppConfig,
}
