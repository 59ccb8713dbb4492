//! View rendering for the collection page.
//!
//! While loading, only the skeleton and the action button are shown. Otherwise
//! the page shows the search box, the collected counter (with a red dot when
//! there are unsaved edits), and one block per set that passes the search
//! filter.

use std::rc::Rc;

use common::model::{unique_keys, CardId, CollectionSet};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::format_count;
use super::messages::Msg;
use super::state::CollectionComponent;
use crate::components::card::CardTile;
use crate::components::skeleton::LoadingSkeleton;

pub fn view(component: &CollectionComponent, ctx: &Context<CollectionComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="collection-root">
            {
                if component.view_model.is_loading() {
                    html! { <LoadingSkeleton /> }
                } else {
                    let sets = component.view_model.visible_sets();
                    let keys = unique_keys(sets.iter().map(|set| set.title.clone()));
                    html! {
                        <>
                            { build_search_input(component, link) }
                            { build_status(component) }
                            { for sets.into_iter().zip(keys).map(|(set, key)| build_set(component, link, set, key)) }
                        </>
                    }
                }
            }
            { build_action_button(component, link) }
        </div>
    }
}

fn build_search_input(component: &CollectionComponent, link: &Scope<CollectionComponent>) -> Html {
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SearchInput(input.value())
    });

    html! {
        <input
            type="search"
            class="search-input"
            placeholder="Search cards"
            value={component.view_model.search_term().to_string()}
            {oninput}
        />
    }
}

fn build_status(component: &CollectionComponent) -> Html {
    let totals = component.view_model.totals();
    let dirty = component.view_model.has_unsaved_changes();

    html! {
        <h2 class="collection-status">
            { format!(
                "You have collected {} out of {} cards.",
                format_count(totals.collected),
                format_count(totals.total)
            ) }
            {
                if dirty {
                    html! { <span class="unsaved-dot" title="Unsaved changes" /> }
                } else {
                    html! {}
                }
            }
        </h2>
    }
}

fn build_set(
    component: &CollectionComponent,
    link: &Scope<CollectionComponent>,
    set: Rc<CollectionSet>,
    key: String,
) -> Html {
    let on_toggle = link.callback(|(id, checked): (CardId, bool)| Msg::Toggle(id, checked));
    let disabled = component.view_model.is_saving();
    let card_keys = unique_keys(set.cards.iter().map(|card| card.id.to_string()));

    html! {
        <div class="set" key={key}>
            <h2 class="set-title">{ set.title.clone() }</h2>
            <div class="set-container">
                { for set.cards.iter().zip(card_keys).map(|(card, key)| html! {
                    <CardTile
                        key={key}
                        card={card.clone()}
                        {disabled}
                        on_toggle={on_toggle.clone()}
                    />
                }) }
            </div>
        </div>
    }
}

fn build_action_button(component: &CollectionComponent, link: &Scope<CollectionComponent>) -> Html {
    let view_model = &component.view_model;
    let label = if view_model.is_loading() {
        "Loading..."
    } else {
        "Save collection"
    };

    html! {
        <button
            class="save-btn"
            onclick={link.callback(|_| Msg::Save)}
            disabled={view_model.is_saving() || view_model.is_loading()}
        >
            { label }
        </button>
    }
}
