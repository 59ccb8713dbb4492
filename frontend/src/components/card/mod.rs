use std::rc::Rc;

use common::model::{CardId, CollectionCard};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CardTileProps {
    pub card: Rc<CollectionCard>,
    /// Disables the checkbox, e.g. while a save is in flight.
    #[prop_or_default]
    pub disabled: bool,
    pub on_toggle: Callback<(CardId, bool)>,
}

/// One card in a set grid: image, outbound link, name and collected checkbox.
pub struct CardTile;

impl Component for CardTile {
    type Message = ();
    type Properties = CardTileProps;

    fn create(_ctx: &Context<Self>) -> Self {
        CardTile
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let card = &props.card;

        let onchange = {
            let id = card.id.clone();
            let on_toggle = props.on_toggle.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_toggle.emit((id.clone(), input.checked()));
            })
        };

        html! {
            <div class={classes!("card", card.collected.then_some("collected"))}>
                <img src={card.image.clone()} class="card-img" alt={card.name.clone()} />
                <div class="card-info">
                    <a
                        href={card.link.clone()}
                        class="card-link"
                        target="_blank"
                        rel="noreferrer noopener"
                    >
                        { card.name.clone() }
                    </a>
                    <input
                        type="checkbox"
                        class="card-checkbox"
                        checked={card.collected}
                        disabled={props.disabled}
                        {onchange}
                    />
                </div>
            </div>
        }
    }
}
