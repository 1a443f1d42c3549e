//! Widget-wide settings, shared with components through a Yew context.

use crate::state::Point;

pub const QUOTES_URL: &str = "https://gist.githubusercontent.com/camperbot/5a022b72e96c4c9585c32bf6a75f62d9/raw/e3c6895ce42069f0ee7e991229064f167fe8ccdc/quotes.json";
pub const CLICK_AUDIO_URL: &str = "https://assets.codepen.io/605876/click.mp3";

/// Minimum travel (in SVG units) for a release to count as a pull.
pub const MIN_TRAVEL: f64 = 50.0;

/// Size of the lamp's SVG viewBox.
pub const VIEWBOX_WIDTH: f64 = 333.0;
pub const VIEWBOX_HEIGHT: f64 = 484.0;

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub quotes_url: String,
    pub click_audio_url: String,
    pub min_travel: f64,
    /// Where the draggable cord hangs when untouched.
    pub cord_rest: Point,
    /// The dragged cord end is never drawn above this y.
    pub cord_drag_min_y: f64,
    pub snap_back_ms: f64,
    /// Duration of one half of a morph yoyo (base -> shape or shape -> base).
    pub morph_step_ms: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            quotes_url: QUOTES_URL.to_string(),
            click_audio_url: CLICK_AUDIO_URL.to_string(),
            min_travel: MIN_TRAVEL,
            cord_rest: Point::new(124.0, 348.0),
            cord_drag_min_y: 400.0,
            snap_back_ms: 100.0,
            morph_step_ms: 100.0,
        }
    }
}
