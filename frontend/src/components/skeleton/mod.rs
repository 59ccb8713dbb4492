use yew::{html, Component, Context, Html};

/// Grey placeholder bars shown while the collection is loading: one for the
/// counter line and a few for the sets.
pub struct LoadingSkeleton;

const SET_PLACEHOLDERS: usize = 5;

impl Component for LoadingSkeleton {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        LoadingSkeleton
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="skeleton-root">
                <div class="skeleton" style="height: 30px;" />
                { for (0..SET_PLACEHOLDERS).map(|_| html! { <div class="skeleton" style="height: 50px;" /> }) }
            </div>
        }
    }
}
