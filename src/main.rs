mod components;
mod config;
mod model;
mod net;
mod state;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger unavailable: {err}").into());
    }
    yew::Renderer::<components::app::App>::new().render();
}
