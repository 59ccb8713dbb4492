//! Update function for the collection page.
//!
//! Elm-style: each `Msg` is applied to the view-model, and network work is
//! spawned as a future that reports back with a follow-up message
//! (`Load` -> `Loaded`, `Save` -> `Saved`). Returns whether to re-render.

use common::error::SyncError;
use common::model::NotificationKind;
use common::store::DocumentStore;
use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{notify, set_window_dirty_flag, show_toast};
use super::messages::Msg;
use super::state::CollectionComponent;

pub fn update(
    component: &mut CollectionComponent,
    ctx: &Context<CollectionComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Load => match component.view_model.begin_load() {
            Ok(ticket) => {
                let store = component.store.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = store.fetch_collection().await;
                    link.send_message(Msg::Loaded(ticket, result));
                });
                true
            }
            Err(err) => {
                report_rejected(&err);
                false
            }
        },
        Msg::Loaded(ticket, result) => {
            if let Some(notification) = component.view_model.finish_load(ticket, result) {
                notify(&notification);
            }
            set_window_dirty_flag(component.view_model.has_unsaved_changes());
            true
        }
        Msg::Toggle(id, checked) => {
            if let Err(err) = component.view_model.toggle_collected(&id, checked) {
                report_rejected(&err);
            }
            set_window_dirty_flag(component.view_model.has_unsaved_changes());
            true
        }
        Msg::SearchInput(raw) => {
            component.view_model.set_search_input(&raw);
            true
        }
        Msg::Save => match component.view_model.begin_save() {
            Ok(snapshot) => {
                let store = component.store.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = store.save_collection(&snapshot).await;
                    link.send_message(Msg::Saved(result));
                });
                true
            }
            Err(err) => {
                report_rejected(&err);
                false
            }
        },
        Msg::Saved(result) => {
            if let Some(notification) = component.view_model.finish_save(result) {
                notify(&notification);
            }
            set_window_dirty_flag(component.view_model.has_unsaved_changes());
            true
        }
    }
}

fn report_rejected(err: &SyncError) {
    warn!("{err}");
    show_toast(&err.to_string(), NotificationKind::Error);
}
