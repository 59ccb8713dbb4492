//! Collection page: wires the Yew `Component` implementation to the state,
//! update and view submodules, and starts the initial load after the first
//! render.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::CollectionProps;
pub use state::CollectionComponent;

impl Component for CollectionComponent {
    type Message = Msg;
    type Properties = CollectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        CollectionComponent::new(&ctx.props().config)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Load);
        }
    }
}
