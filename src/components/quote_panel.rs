use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::WidgetConfig;
use crate::model::QuoteStatus;
use crate::net::{QuoteError, RequestSeq, fetch_quotes};
use crate::util::{random_unit, share_url};

#[derive(Properties, PartialEq, Clone)]
pub struct QuotePanelProps {
    /// Lamp glow; `None` while the lamp is off.
    pub glow: Option<String>,
    /// A new value requests a fresh quote.
    pub refresh: u32,
}

#[function_component(QuotePanel)]
pub fn quote_panel(props: &QuotePanelProps) -> Html {
    let config = use_context::<WidgetConfig>().unwrap_or_default();
    let status = use_state(|| QuoteStatus::Loading);
    let seq = use_mut_ref(RequestSeq::default);

    let refresh = {
        let status = status.clone();
        let seq = seq.clone();
        let url = config.quotes_url.clone();
        Callback::from(move |_: ()| {
            let id = seq.borrow_mut().next();
            // Keep the current quote on screen until its replacement arrives.
            if !matches!(*status, QuoteStatus::Ready(_)) {
                status.set(QuoteStatus::Loading);
            }
            let status = status.clone();
            let seq = seq.clone();
            let url = url.clone();
            spawn_local(async move {
                let result = fetch_quotes(&url).await;
                if !seq.borrow().is_latest(id) {
                    log::debug!("dropping stale quote response #{id}");
                    return;
                }
                let picked = result.and_then(|list| list.pick(random_unit()).cloned().ok_or(QuoteError::Empty));
                match picked {
                    Ok(quote) => status.set(QuoteStatus::Ready(quote)),
                    Err(err) => {
                        log::warn!("quote refresh failed: {err}");
                        status.set(QuoteStatus::Failed(err.to_string()));
                    }
                }
            });
        })
    };

    // Fetch on mount and whenever the lamp asks for a new quote.
    {
        let refresh = refresh.clone();
        use_effect_with(props.refresh, move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_click = {
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let glow = props.glow.clone();
    let box_shadow = glow
        .as_ref()
        .map_or("none".to_string(), |g| format!("0 10px 10px {g}, 0 0 15px {g}"));
    let text_shadow = glow.as_ref().map_or("none".to_string(), |g| format!("0 0 8px {g}"));
    let button_bg = glow.clone().unwrap_or_else(|| "black".to_string());
    let (text, author) = status.lines();
    let failed = matches!(*status, QuoteStatus::Failed(_));
    let share = match &*status {
        QuoteStatus::Ready(q) => Some(share_url(&q.share_text())),
        _ => None,
    };

    html! {
        <div class="quote-box-container" style={format!("box-shadow:{box_shadow};")}>
            <div id="quote-box">
                <div id="text" class={classes!(failed.then_some("quote--error"))}
                    style={format!("color:#FFF; text-shadow:{text_shadow};")}>
                    <b>{"\u{201C} "}{ text.to_string() }{" \u{201D}"}</b>
                </div>
                <div id="author" style="color:#FFF;">
                    { if author.is_empty() { String::new() } else { format!("~ {author}") } }
                </div>
                <footer>
                    {
                        if let Some(href) = share {
                            html! {
                                <a id="tweet-quote" class="btn twitter" href={href} target="_blank" rel="noopener"
                                    style={format!("background-color:{button_bg};")}>{"Tweet"}</a>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <button id="new-quote" class="btn next" onclick={on_click}
                        style={format!("background-color:{button_bg};")}>
                        { if failed { "Try again" } else { "New quote" } }
                    </button>
                </footer>
            </div>
        </div>
    }
}
