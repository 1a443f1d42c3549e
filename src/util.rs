// Browser helpers shared by the components.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, HtmlElement};

/// Uniform sample in [0, 1).
pub fn random_unit() -> f64 {
    js_sys::Math::random()
}

/// Writes CSS custom properties onto `document.documentElement`.
pub fn set_root_vars(vars: &[(&'static str, String)]) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::warn!("no document root; lamp colors not published");
        return;
    };
    let style = root.style();
    for (name, value) in vars {
        if let Err(err) = style.set_property(name, value) {
            log::warn!("failed to set {name}: {err:?}");
        }
    }
}

pub fn load_click(url: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(url) {
        Ok(audio) => Some(audio),
        Err(err) => {
            log::debug!("click audio unavailable: {err:?}");
            None
        }
    }
}

/// Plays the click from the start. Autoplay blocks and decode errors are ignored.
pub fn play_click(audio: &HtmlAudioElement) {
    audio.set_current_time(0.0);
    match audio.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::debug!("click playback rejected: {err:?}");
            }
        }),
        Err(err) => log::debug!("click playback failed: {err:?}"),
    }
}

pub fn share_url(text: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(text).into();
    format!("https://twitter.com/intent/tweet?text={encoded}")
}
