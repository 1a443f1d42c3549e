//! Core data models for the pull-cord lamp.
//! The lamp's rendered state is a `Reducible` fed by transitions that the
//! controller in `state::controller` decides on.

use serde::Deserialize;
use std::rc::Rc;
use yew::Reducible;

pub const HUE_RANGE: f64 = 360.0;
/// Published for both glow variables while the lamp is off.
pub const UNLIT_COLOR: &str = "hsl(0, 0%, 0%)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LampPower {
    #[default]
    Off,
    On,
}

impl LampPower {
    pub fn toggled(self) -> Self {
        match self {
            LampPower::Off => LampPower::On,
            LampPower::On => LampPower::Off,
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, LampPower::On)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowColor {
    /// Always within [0, 360).
    pub hue: f64,
}

impl GlowColor {
    /// Builds a color from a uniform sample in [0, 1), at the published
    /// precision of one decimal.
    pub fn from_unit(sample: f64) -> Self {
        Self {
            hue: wrap_tenths(sample * HUE_RANGE),
        }
    }

    /// Hue as published to CSS; always below 360.
    pub fn hue_css(&self) -> String {
        format!("{:.1}", wrap_tenths(self.hue))
    }

    pub fn css(&self) -> String {
        format!("hsl({}, 40%, 45%)", self.hue_css())
    }

    pub fn css_dark(&self) -> String {
        format!("hsl({}, 40%, 35%)", self.hue_css())
    }
}

// Rounds to one decimal, then wraps into [0, 360).
fn wrap_tenths(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let hue = ((hue * 10.0).round() / 10.0).rem_euclid(HUE_RANGE);
    // rem_euclid can land on exactly 360 for tiny negative inputs; `+ 0.0`
    // turns -0.0 into 0.0 so it never prints as "-0.0".
    if hue >= HUE_RANGE { 0.0 } else { hue + 0.0 }
}

/// Result of a qualifying pull.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    TurnedOn { glow: GlowColor },
    TurnedOff,
}

impl Transition {
    pub fn power(&self) -> LampPower {
        match self {
            Transition::TurnedOn { .. } => LampPower::On,
            Transition::TurnedOff => LampPower::Off,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LampState {
    pub power: LampPower,
    pub glow: Option<GlowColor>,
    /// Bumped on every OFF -> ON; the quote panel refreshes when it changes.
    pub quote_requests: u32,
}

impl LampState {
    /// Named CSS custom properties read by the stylesheet.
    pub fn css_vars(&self) -> Vec<(&'static str, String)> {
        let on = if self.power.is_on() { "1" } else { "0" };
        let mut vars = vec![("--on", on.to_string())];
        match self.glow {
            Some(glow) => {
                vars.push(("--shade-hue", glow.hue_css()));
                vars.push(("--glow-color", glow.css()));
                vars.push(("--glow-color-dark", glow.css_dark()));
            }
            None => {
                vars.push(("--glow-color", UNLIT_COLOR.to_string()));
                vars.push(("--glow-color-dark", UNLIT_COLOR.to_string()));
            }
        }
        vars
    }

    pub fn glow_css(&self) -> Option<String> {
        self.glow.map(|g| g.css())
    }
}

pub enum LampAction {
    Apply(Transition),
}

impl Reducible for LampState {
    type Action = LampAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        let LampAction::Apply(transition) = action;
        new.power = transition.power();
        match transition {
            Transition::TurnedOn { glow } => {
                new.glow = Some(glow);
                new.quote_requests = new.quote_requests.wrapping_add(1);
            }
            Transition::TurnedOff => new.glow = None,
        }
        Rc::new(new)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

impl Quote {
    pub fn share_text(&self) -> String {
        format!("\"{}\" ~{}", self.quote, self.author)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct QuoteList {
    pub quotes: Vec<Quote>,
}

impl QuoteList {
    /// Picks the entry a uniform sample in [0, 1) lands on.
    pub fn pick(&self, sample: f64) -> Option<&Quote> {
        if self.quotes.is_empty() {
            return None;
        }
        let len = self.quotes.len();
        let sample = if sample.is_finite() { sample.clamp(0.0, 1.0) } else { 0.0 };
        let idx = ((sample * len as f64).floor() as usize).min(len - 1);
        self.quotes.get(idx)
    }
}

pub const LOADING_TEXT: &str = "Loading...";

/// What the quote panel is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuoteStatus {
    Loading,
    Ready(Quote),
    Failed(String),
}

impl QuoteStatus {
    /// Text and author lines as rendered.
    pub fn lines(&self) -> (&str, &str) {
        match self {
            QuoteStatus::Loading => (LOADING_TEXT, ""),
            QuoteStatus::Ready(q) => (&q.quote, &q.author),
            QuoteStatus::Failed(msg) => (msg, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(q: &str, a: &str) -> Quote {
        Quote {
            quote: q.to_string(),
            author: a.to_string(),
        }
    }

    #[test]
    fn hue_stays_in_range() {
        for sample in [0.0, 0.25, 0.5, 0.999_999_9, 1.0, -0.1, -1e-18, f64::NAN] {
            let glow = GlowColor::from_unit(sample);
            assert!((0.0..HUE_RANGE).contains(&glow.hue), "sample {sample} gave {}", glow.hue);
        }
        assert_eq!(GlowColor::from_unit(0.5).hue, 180.0);
    }

    #[test]
    fn hue_just_below_full_turn_publishes_as_zero() {
        let glow = GlowColor::from_unit(0.999_999_9);
        assert_eq!(glow.hue, 0.0);
        let state = LampState {
            power: LampPower::On,
            glow: Some(glow),
            quote_requests: 1,
        };
        let vars = state.css_vars();
        assert!(vars.contains(&("--shade-hue", "0.0".to_string())));
        assert!(vars.contains(&("--glow-color", "hsl(0.0, 40%, 45%)".to_string())));

        // A hue set directly is wrapped the same way when formatted.
        let direct = GlowColor { hue: 359.96 };
        assert_eq!(direct.hue_css(), "0.0");
        assert_eq!(direct.css_dark(), "hsl(0.0, 40%, 35%)");
        assert_eq!(GlowColor { hue: 359.94 }.hue_css(), "359.9");
        assert_eq!(GlowColor::from_unit(-1e-18).hue_css(), "0.0");
    }

    #[test]
    fn glow_and_dark_variant_share_the_hue() {
        let glow = GlowColor { hue: 200.0 };
        assert_eq!(glow.css(), "hsl(200.0, 40%, 45%)");
        assert_eq!(glow.css_dark(), "hsl(200.0, 40%, 35%)");
    }

    #[test]
    fn turning_on_publishes_glow_and_requests_a_quote() {
        let state = Rc::new(LampState::default());
        let glow = GlowColor { hue: 42.0 };
        let state = state.reduce(LampAction::Apply(Transition::TurnedOn { glow }));
        assert_eq!(state.power, LampPower::On);
        assert_eq!(state.glow, Some(glow));
        assert_eq!(state.quote_requests, 1);

        let vars = state.css_vars();
        assert!(vars.contains(&("--on", "1".to_string())));
        assert!(vars.contains(&("--shade-hue", "42.0".to_string())));
        assert!(vars.contains(&("--glow-color", "hsl(42.0, 40%, 45%)".to_string())));
    }

    #[test]
    fn turning_off_clears_glow_without_new_quote() {
        let state = Rc::new(LampState::default())
            .reduce(LampAction::Apply(Transition::TurnedOn {
                glow: GlowColor { hue: 10.0 },
            }))
            .reduce(LampAction::Apply(Transition::TurnedOff));
        assert_eq!(state.power, LampPower::Off);
        assert!(state.glow.is_none());
        assert!(state.glow_css().is_none());
        assert_eq!(state.quote_requests, 1);
        let vars = state.css_vars();
        assert!(vars.contains(&("--on", "0".to_string())));
        assert!(vars.contains(&("--glow-color", UNLIT_COLOR.to_string())));
        assert!(vars.iter().all(|(k, _)| *k != "--shade-hue"));
    }

    #[test]
    fn pick_never_goes_out_of_range() {
        let list = QuoteList {
            quotes: (0..7).map(|i| quote(&i.to_string(), "x")).collect(),
        };
        for i in 0..=100 {
            let sample = f64::from(i) / 100.0;
            assert!(list.pick(sample).is_some());
        }
        assert_eq!(list.pick(1.0).unwrap().quote, "6");
        assert_eq!(list.pick(0.0).unwrap().quote, "0");
        assert_eq!(list.pick(f64::NAN).unwrap().quote, "0");
    }

    #[test]
    fn loading_and_failure_lines() {
        assert_eq!(QuoteStatus::Loading.lines(), ("Loading...", ""));
        let failed = QuoteStatus::Failed("offline".to_string());
        assert_eq!(failed.lines(), ("offline", ""));
    }

    #[test]
    fn pick_on_empty_list_is_none() {
        assert!(QuoteList::default().pick(0.3).is_none());
    }

    #[test]
    fn single_quote_list_always_yields_it() {
        let list: QuoteList =
            serde_json::from_str(r#"{"quotes":[{"quote":"A","author":"B"}]}"#).unwrap();
        for sample in [0.0, 0.5, 0.99] {
            let status = QuoteStatus::Ready(list.pick(sample).unwrap().clone());
            assert_eq!(status.lines(), ("A", "B"));
        }
        assert_eq!(list.quotes[0].share_text(), "\"A\" ~B");
    }
}
