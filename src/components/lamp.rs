use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlAudioElement, PointerEvent};
use yew::prelude::*;

use crate::config::{VIEWBOX_HEIGHT, VIEWBOX_WIDTH, WidgetConfig};
use crate::model::{LampAction, LampState, Transition};
use crate::state::{CordTimeline, CordView, Ignored, LampController, Point, ReleaseOutcome, ViewportMap};
use crate::util::{load_click, play_click, random_unit};

// Cord shapes for the morph; the first is the straight base shape.
const RIG_PATHS: [&str; 6] = [
    "M124 187.033V347",
    "M124 187.023s17.007 21.921 17.007 34.846c0 12.925-11.338 23.231-17.007 34.846-5.669 11.615-17.007 21.921-17.007 34.846 0 12.925 17.007 34.846 17.007 34.846",
    "M124 187.017s-21.259 17.932-21.259 30.26c0 12.327 14.173 20.173 21.259 30.26 7.086 10.086 21.259 17.933 21.259 30.26 0 12.327-21.259 30.26-21.259 30.26",
    "M124 187s29.763 8.644 29.763 20.735-19.842 13.823-29.763 20.734c-9.921 6.912-29.763 8.644-29.763 20.735S124 269.939 124 269.939",
    "M124 187.029s-10.63 26.199-10.63 39.992c0 13.794 7.087 26.661 10.63 39.992 3.543 13.331 10.63 26.198 10.63 39.992 0 13.793-10.63 39.992-10.63 39.992",
    "M124 187.033V347",
];

const BASE_SIDE: &str = "M165 464c44.183 0 80-8.954 80-20v-14h-22.869c-14.519-3.703-34.752-6-57.131-6-22.379 0-42.612 2.297-57.131 6H85v14c0 11.046 35.817 20 80 20z";
const POST_BODY: &str = "M180 142h-30v286c0 3.866 6.716 7 15 7 8.284 0 15-3.134 15-7V142z";
const LIGHT: &str = "M290.5 193H39L0 463.5c0 11.046 75.478 20 165.5 20s167-11.954 167-23l-42-267.5z";
const TOP_BODY: &str = "M164.859 0c55.229 0 100 8.954 100 20l29.859 199.06C291.529 208.451 234.609 200 164.859 200S38.189 208.451 35 219.06L64.859 20c0-11.046 44.772-20 100-20z";
const MOUTH: &str = "M165 178c19.882 0 36-16.118 36-36h-72c0 19.882 16.118 36 36 36z";
const EYE_LEFT: &str = "M115 135c0-5.523-5.82-10-13-10s-13 4.477-13 10";
const EYE_RIGHT: &str = "M241 135c0-5.523-5.82-10-13-10s-13 4.477-13 10";

fn view_point(svg_ref: &NodeRef, client_x: i32, client_y: i32) -> Point {
    let (x, y) = (f64::from(client_x), f64::from(client_y));
    match svg_ref.cast::<Element>() {
        Some(svg) => {
            let rect = svg.get_bounding_client_rect();
            ViewportMap::from_rect(
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
                VIEWBOX_WIDTH,
                VIEWBOX_HEIGHT,
            )
            .to_view(x, y)
        }
        None => Point::new(x, y),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LampProps {
    pub lamp: UseReducerHandle<LampState>,
}

#[function_component(Lamp)]
pub fn lamp(props: &LampProps) -> Html {
    let config = use_context::<WidgetConfig>().unwrap_or_default();
    let svg_ref = use_node_ref();
    let controller = {
        let config = config.clone();
        use_mut_ref(move || LampController::new(&config))
    };
    let timeline = {
        let config = config.clone();
        use_mut_ref(move || {
            CordTimeline::new(
                config.cord_rest,
                config.snap_back_ms,
                config.morph_step_ms,
                RIG_PATHS.len(),
            )
        })
    };
    let cord_view = {
        let timeline = timeline.clone();
        use_state(move || timeline.borrow().view())
    };

    {
        let controller = controller.clone();
        let timeline = timeline.clone();
        let cord_view = cord_view.clone();
        let svg_ref = svg_ref.clone();
        let dispatcher = props.lamp.dispatcher();
        let click_url = config.click_audio_url.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window();
            let audio: Rc<Option<HtmlAudioElement>> = Rc::new(load_click(&click_url));

            // Animation-frame loop, only scheduled while the cord is moving.
            let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
            let last_ts: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id = raf_id.clone();
                let frame_cell_loop = frame_cell.clone();
                let controller = controller.clone();
                let timeline = timeline.clone();
                let cord_view = cord_view.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                    raf_id.set(None);
                    let dt = last_ts.get().map_or(16.0, |prev| ts - prev);
                    last_ts.set(Some(ts));
                    let tick = timeline.borrow_mut().advance(dt);
                    cord_view.set(timeline.borrow().view());
                    if tick.settled {
                        let mut ctl = controller.borrow_mut();
                        ctl.settle_complete();
                        log::debug!("cord settled with lamp {:?}", ctl.power());
                    }
                    if !tick.animating {
                        last_ts.set(None);
                        return;
                    }
                    let Some(win) = web_sys::window() else { return };
                    if let Some(cb) = frame_cell_loop.borrow().as_ref() {
                        if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            raf_id.set(Some(id));
                        }
                    }
                }) as Box<dyn FnMut(f64)>));
            }
            // Starts the loop if it is idle.
            let kick: Rc<dyn Fn()> = {
                let raf_id = raf_id.clone();
                let frame_cell = frame_cell.clone();
                Rc::new(move || {
                    if raf_id.get().is_some() {
                        return;
                    }
                    let Some(win) = web_sys::window() else { return };
                    if let Some(cb) = frame_cell.borrow().as_ref() {
                        if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            raf_id.set(Some(id));
                        }
                    }
                })
            };

            let pointermove_cb = {
                let controller = controller.clone();
                let timeline = timeline.clone();
                let cord_view = cord_view.clone();
                let svg_ref = svg_ref.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    let ctl = controller.borrow();
                    if !ctl.is_pressed() {
                        return;
                    }
                    let at = view_point(&svg_ref, e.client_x(), e.client_y());
                    if let Some(end) = ctl.drag_move(e.pointer_id(), at) {
                        let mut tl = timeline.borrow_mut();
                        tl.drag_to(end);
                        cord_view.set(tl.view());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let pointerup_cb = {
                let controller = controller.clone();
                let timeline = timeline.clone();
                let kick = kick.clone();
                let svg_ref = svg_ref.clone();
                let audio = audio.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    let at = view_point(&svg_ref, e.client_x(), e.client_y());
                    let outcome =
                        controller.borrow_mut().release_end(e.pointer_id(), at, random_unit);
                    match outcome {
                        ReleaseOutcome::Ignored(Ignored::NoPress) => return,
                        ReleaseOutcome::Ignored(Ignored::ShortPull { travelled }) => {
                            log::debug!("pull of {travelled:.1} too short");
                            timeline.borrow_mut().snap_back();
                        }
                        ReleaseOutcome::Ignored(Ignored::Settling) => {
                            log::debug!("pull ignored while cord settles");
                            timeline.borrow_mut().snap_back();
                        }
                        ReleaseOutcome::Toggled(transition) => {
                            {
                                let mut tl = timeline.borrow_mut();
                                tl.snap_back();
                                tl.start_morph();
                            }
                            match transition {
                                Transition::TurnedOn { glow } => {
                                    log::info!("lamp on, hue {:.1}", glow.hue);
                                }
                                Transition::TurnedOff => log::info!("lamp off"),
                            }
                            dispatcher.dispatch(LampAction::Apply(transition));
                            if let Some(audio) = &*audio {
                                play_click(audio);
                            }
                        }
                    }
                    kick();
                }) as Box<dyn FnMut(_)>)
            };
            let pointercancel_cb = {
                let controller = controller.clone();
                let timeline = timeline.clone();
                let kick = kick.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    if !controller.borrow_mut().cancel(e.pointer_id()) {
                        return;
                    }
                    timeline.borrow_mut().snap_back();
                    kick();
                }) as Box<dyn FnMut(_)>)
            };

            if let Some(win) = window.as_ref() {
                for (name, cb) in [
                    ("pointermove", &pointermove_cb),
                    ("pointerup", &pointerup_cb),
                    ("pointercancel", &pointercancel_cb),
                ] {
                    if let Err(err) = win.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref()) {
                        log::warn!("could not listen for {name}: {err:?}");
                    }
                }
            }

            move || {
                if let Some(win) = window.as_ref() {
                    for (name, cb) in [
                        ("pointermove", &pointermove_cb),
                        ("pointerup", &pointerup_cb),
                        ("pointercancel", &pointercancel_cb),
                    ] {
                        let _ = win.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                    }
                    if let Some(id) = raf_id.take() {
                        let _ = win.cancel_animation_frame(id);
                    }
                }
                controller.borrow_mut().teardown();
                frame_cell.borrow_mut().take();
            }
        });
    }

    let onpointerdown = {
        let controller = controller.clone();
        let svg_ref = svg_ref.clone();
        Callback::from(move |e: PointerEvent| {
            e.prevent_default();
            let at = view_point(&svg_ref, e.client_x(), e.client_y());
            if !controller.borrow_mut().press_start(e.pointer_id(), at) {
                log::debug!("cord already held; ignoring pointer {}", e.pointer_id());
            }
        })
    };

    let is_on = props.lamp.power.is_on();
    let hit_cursor = if controller.borrow().is_settling() { "default" } else { "grab" };
    let eye_style = format!(
        "transform-box:fill-box; transform-origin:50% 50%; transform:translateY(50%) rotate({}deg);",
        if is_on { 0 } else { 180 }
    );
    let CordView { dummy_end, rig_frame } = *cord_view;

    html! {
        <svg ref={svg_ref} class={classes!("lamp", is_on.then_some("lamp--on"))} viewBox="0 0 333 484" fill="none" xmlns="http://www.w3.org/2000/svg">
            <g class="lamp__shade shade">
                <ellipse class="shade__opening" cx="165" cy="220" rx="130" ry="20" />
                <ellipse class="shade__opening-shade" cx="165" cy="220" rx="130" ry="20" fill="url(#opening-shade)" />
            </g>
            <g class="lamp__base base">
                <path class="base__side" d={BASE_SIDE} />
                <path d={BASE_SIDE} fill="url(#side-shading)" />
                <ellipse class="base__top" cx="165" cy="430" rx="80" ry="20" />
                <ellipse cx="165" cy="430" rx="80" ry="20" fill="url(#base-shading)" />
            </g>
            <g class="lamp__post post">
                <path class="post__body" d={POST_BODY} />
                <path d={POST_BODY} fill="url(#post-shading)" />
            </g>
            <g class="lamp__cords cords" transform="translate(-10 0)">
                {
                    match rig_frame {
                        Some(i) => html! {
                            <path class="cord cord--rig" d={RIG_PATHS.get(i).copied().unwrap_or(RIG_PATHS[0])} stroke-width="6" stroke-linecap="round" />
                        },
                        None => html! {
                            <line class="cord cord--dummy" x1="124" y1="190"
                                x2={dummy_end.x.to_string()} y2={dummy_end.y.to_string()}
                                stroke-width="6" stroke-linecap="round" />
                        },
                    }
                }
            </g>
            <path class="lamp__light" d={LIGHT} fill="url(#light)" />
            <g class="lamp__top top">
                <path class="top__body" fill-rule="evenodd" clip-rule="evenodd" d={TOP_BODY} />
                <path class="top__shading" fill-rule="evenodd" clip-rule="evenodd" d={TOP_BODY} fill="url(#top-shading)" />
            </g>
            <g class="lamp__face face">
                <g class="lamp__mouth">
                    <path d={MOUTH} fill="#141414" />
                    <clipPath id="mouth">
                        <path d={MOUTH} fill="#141414" />
                    </clipPath>
                    <g clip-path="url(#mouth)">
                        <circle class="lamp__tongue" cx="179.4" cy="172.6" r="18" />
                    </g>
                </g>
                <g class="lamp__eyes">
                    <path class="lamp__eye lamp__stroke" style={eye_style.clone()} d={EYE_LEFT} stroke-width="4" stroke-linecap="round" stroke-linejoin="round" />
                    <path class="lamp__eye lamp__stroke" style={eye_style} d={EYE_RIGHT} stroke-width="4" stroke-linecap="round" stroke-linejoin="round" />
                </g>
            </g>
            <circle class="lamp__hit" cx="124" cy="347" r="66" fill="#C4C4C4" fill-opacity=".1"
                transform="translate(-10 0)" style={format!("touch-action:none; cursor:{hit_cursor};")}
                {onpointerdown} />
            <defs>
                <linearGradient id="opening-shade" x1="35" y1="220" x2="295" y2="220" gradientUnits="userSpaceOnUse">
                    <stop />
                    <stop offset="1" stop-color="var(--shade)" stop-opacity="0" />
                </linearGradient>
                <linearGradient id="base-shading" x1="85" y1="444" x2="245" y2="444" gradientUnits="userSpaceOnUse">
                    <stop stop-color="var(--b-1)" />
                    <stop offset="0.8" stop-color="var(--b-2)" stop-opacity="0" />
                </linearGradient>
                <linearGradient id="side-shading" x1="119" y1="430" x2="245" y2="430" gradientUnits="userSpaceOnUse">
                    <stop stop-color="var(--b-3)" />
                    <stop offset="1" stop-color="var(--b-4)" stop-opacity="0" />
                </linearGradient>
                <linearGradient id="post-shading" x1="150" y1="288" x2="180" y2="288" gradientUnits="userSpaceOnUse">
                    <stop stop-color="var(--b-1)" />
                    <stop offset="1" stop-color="var(--b-2)" stop-opacity="0" />
                </linearGradient>
                <linearGradient id="light" x1="165.5" y1="218.5" x2="165.5" y2="483.5" gradientUnits="userSpaceOnUse">
                    <stop stop-color="var(--l-1)" stop-opacity=".2" />
                    <stop offset="1" stop-color="var(--l-2)" stop-opacity="0" />
                </linearGradient>
                <linearGradient id="top-shading" x1="56" y1="110" x2="295" y2="110" gradientUnits="userSpaceOnUse">
                    <stop stop-color="var(--t-1)" stop-opacity=".8" />
                    <stop offset="1" stop-color="var(--t-2)" stop-opacity="0" />
                </linearGradient>
            </defs>
        </svg>
    }
}
