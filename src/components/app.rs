use super::{lamp::Lamp, quote_panel::QuotePanel};
use crate::config::WidgetConfig;
use crate::model::LampState;
use crate::util::set_root_vars;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(WidgetConfig::default);
    let lamp = use_reducer(LampState::default);

    // Publish the lamp's visual variables for the stylesheet
    {
        let state = (*lamp).clone();
        use_effect_with(state, move |state| {
            set_root_vars(&state.css_vars());
            || ()
        });
    }

    let is_on = lamp.power.is_on();

    html! {
        <ContextProvider<WidgetConfig> context={(*config).clone()}>
            <div class="container">
                <Lamp lamp={lamp.clone()} />
                <div class={classes!("quote-wrapper", is_on.then_some("active"))}>
                    <QuotePanel glow={lamp.glow_css()} refresh={lamp.quote_requests} />
                </div>
            </div>
        </ContextProvider<WidgetConfig>>
    }
}
