use common::config::AppConfig;
use common::error::ConfigError;
use log::{error, info};
use yew::{html, Component, Context, Html};

use crate::components::collection::CollectionComponent;
use crate::config;

/// Root component. Validates the configuration once and either mounts the
/// collection page or explains which setting is missing.
pub struct App {
    config: Result<AppConfig, ConfigError>,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = config::load();
        match &config {
            Ok(config) => info!("store configuration loaded, search script {}", config.search_script),
            Err(err) => error!("{err}"),
        }
        Self { config }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match &self.config {
            Ok(config) => html! {
                <div>
                    <CollectionComponent config={config.clone()} />
                </div>
            },
            Err(err) => html! {
                <div class="config-error">
                    <h2>{ "Configuration error" }</h2>
                    <p>{ err.to_string() }</p>
                </div>
            },
        }
    }
}
