use crate::app::App;

mod app;
mod components;
mod config;
mod logging;
mod store;

fn main() {
    logging::init(config::log_level());
    yew::Renderer::<App>::new().render();
}
