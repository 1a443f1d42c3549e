//! The lamp's single owned controller.
//!
//! Holds the on/off state, the toggle guard and the gesture in progress. The
//! view feeds it pointer events and the cord timeline's settle event; it hands
//! back what happened so the view can play effects and publish colors.

use std::cmp::Ordering;

use super::gesture::{DragSample, Point, PointerId, PullGesture};
use super::guard::ToggleGuard;
use crate::config::WidgetConfig;
use crate::model::{GlowColor, LampPower, Transition};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ignored {
    /// Release without a press on the hit region, or a cancelled pointer.
    NoPress,
    /// Travel at or below the pull threshold.
    ShortPull { travelled: f64 },
    /// A previous toggle has not settled yet.
    Settling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseOutcome {
    Toggled(Transition),
    /// Visual reset only.
    Ignored(Ignored),
}

#[derive(Debug, Clone)]
pub struct LampController {
    power: LampPower,
    guard: ToggleGuard,
    gesture: PullGesture,
    min_travel: f64,
}

impl LampController {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            power: LampPower::Off,
            guard: ToggleGuard::default(),
            gesture: PullGesture::new(config.cord_rest, config.cord_drag_min_y),
            min_travel: config.min_travel,
        }
    }

    pub fn power(&self) -> LampPower {
        self.power
    }

    pub fn is_settling(&self) -> bool {
        self.guard.in_flight()
    }

    pub fn is_pressed(&self) -> bool {
        self.gesture.is_pressed()
    }

    /// Returns false when another pointer already holds the cord.
    pub fn press_start(&mut self, pointer: PointerId, at: Point) -> bool {
        self.gesture.press(pointer, at)
    }

    /// Where the dragged cord end should be drawn. Never touches lamp state.
    pub fn drag_move(&self, pointer: PointerId, at: Point) -> Option<Point> {
        self.gesture.drag(pointer, at)
    }

    /// Judges the finished gesture. `sample_unit` is only called when the lamp
    /// turns on and must return a uniform sample in [0, 1).
    pub fn release_end(
        &mut self,
        pointer: PointerId,
        at: Point,
        sample_unit: impl FnOnce() -> f64,
    ) -> ReleaseOutcome {
        let Some(sample) = self.gesture.release(pointer, at) else {
            return ReleaseOutcome::Ignored(Ignored::NoPress);
        };
        match self.judge(&sample) {
            Some(ignored) => ReleaseOutcome::Ignored(ignored),
            None => ReleaseOutcome::Toggled(self.toggle(sample_unit)),
        }
    }

    /// Returns whether `pointer` held the cord.
    pub fn cancel(&mut self, pointer: PointerId) -> bool {
        self.gesture.cancel(pointer)
    }

    /// Drops any press, whichever pointer made it.
    pub fn teardown(&mut self) {
        self.gesture.clear();
    }

    /// Cord animation finished: a new toggle may start.
    pub fn settle_complete(&mut self) {
        self.guard.release();
    }

    fn judge(&mut self, sample: &DragSample) -> Option<Ignored> {
        let travelled = sample.travelled();
        // NaN travel must not toggle.
        if travelled.partial_cmp(&self.min_travel) != Some(Ordering::Greater) {
            return Some(Ignored::ShortPull { travelled });
        }
        if !self.guard.try_acquire() {
            return Some(Ignored::Settling);
        }
        None
    }

    fn toggle(&mut self, sample_unit: impl FnOnce() -> f64) -> Transition {
        self.power = self.power.toggled();
        match self.power {
            LampPower::On => Transition::TurnedOn {
                glow: GlowColor::from_unit(sample_unit()),
            },
            LampPower::Off => Transition::TurnedOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HUE_RANGE;

    fn controller() -> LampController {
        LampController::new(&WidgetConfig::default())
    }

    const MOUSE: PointerId = 1;

    fn pull(c: &mut LampController, distance: f64) -> ReleaseOutcome {
        let start = Point::new(124.0, 347.0);
        c.press_start(MOUSE, start);
        c.release_end(MOUSE, Point::new(start.x, start.y + distance), || 0.5)
    }

    #[test]
    fn zero_distance_release_only_resets() {
        let mut c = controller();
        let out = pull(&mut c, 0.0);
        assert_eq!(out, ReleaseOutcome::Ignored(Ignored::ShortPull { travelled: 0.0 }));
        assert_eq!(c.power(), LampPower::Off);
        assert!(!c.is_settling());
    }

    #[test]
    fn pulls_at_or_below_threshold_never_toggle() {
        let mut c = controller();
        for d in [1.0, 25.0, 49.9, 50.0] {
            assert!(matches!(pull(&mut c, d), ReleaseOutcome::Ignored(Ignored::ShortPull { .. })));
            assert_eq!(c.power(), LampPower::Off);
        }
        // Diagonal travel of exactly 50.
        c.press_start(MOUSE, Point::new(0.0, 0.0));
        let out = c.release_end(MOUSE, Point::new(30.0, 40.0), || 0.5);
        assert!(matches!(out, ReleaseOutcome::Ignored(_)));
    }

    #[test]
    fn long_pull_from_off_turns_on_and_holds_guard() {
        let mut c = controller();
        let out = pull(&mut c, 200.0);
        match out {
            ReleaseOutcome::Toggled(Transition::TurnedOn { glow }) => {
                assert!((0.0..HUE_RANGE).contains(&glow.hue));
                assert_eq!(glow.hue, 180.0);
            }
            other => panic!("expected turn on, got {other:?}"),
        }
        assert_eq!(c.power(), LampPower::On);
        assert!(c.is_settling());
        c.settle_complete();
        assert!(!c.is_settling());
    }

    #[test]
    fn second_pull_before_settle_is_rejected() {
        let mut c = controller();
        pull(&mut c, 200.0);
        let out = pull(&mut c, 200.0);
        assert_eq!(out, ReleaseOutcome::Ignored(Ignored::Settling));
        assert_eq!(c.power(), LampPower::On);
        assert!(c.is_settling());
    }

    #[test]
    fn pull_after_settle_turns_off_without_sampling() {
        let mut c = controller();
        pull(&mut c, 200.0);
        c.settle_complete();
        c.press_start(MOUSE, Point::new(0.0, 0.0));
        let out = c.release_end(MOUSE, Point::new(0.0, 120.0), || panic!("no color when turning off"));
        assert_eq!(out, ReleaseOutcome::Toggled(Transition::TurnedOff));
        assert_eq!(c.power(), LampPower::Off);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut c = controller();
        let out = c.release_end(MOUSE, Point::new(500.0, 500.0), || 0.1);
        assert_eq!(out, ReleaseOutcome::Ignored(Ignored::NoPress));
        assert_eq!(c.power(), LampPower::Off);
    }

    #[test]
    fn cancelled_gesture_cannot_toggle() {
        let mut c = controller();
        c.press_start(MOUSE, Point::new(0.0, 0.0));
        assert!(c.is_pressed());
        assert!(c.cancel(MOUSE));
        let out = c.release_end(MOUSE, Point::new(0.0, 300.0), || 0.1);
        assert_eq!(out, ReleaseOutcome::Ignored(Ignored::NoPress));
    }

    #[test]
    fn release_from_another_finger_does_not_toggle() {
        let mut c = controller();
        let (finger_a, finger_b) = (7, 8);
        assert!(c.press_start(finger_a, Point::new(124.0, 347.0)));
        // B never pressed the hit circle but lifts far from A's start.
        let out = c.release_end(finger_b, Point::new(124.0, 547.0), || 0.5);
        assert_eq!(out, ReleaseOutcome::Ignored(Ignored::NoPress));
        assert_eq!(c.power(), LampPower::Off);
        assert!(!c.is_settling());
        assert!(c.drag_move(finger_b, Point::new(0.0, 0.0)).is_none());
        assert!(!c.cancel(finger_b));
        // A still owns its gesture.
        let out = c.release_end(finger_a, Point::new(124.0, 547.0), || 0.5);
        assert!(matches!(out, ReleaseOutcome::Toggled(Transition::TurnedOn { .. })));
    }

    #[test]
    fn second_press_does_not_move_the_start() {
        let mut c = controller();
        assert!(c.press_start(7, Point::new(124.0, 347.0)));
        assert!(!c.press_start(8, Point::new(124.0, 547.0)));
        // Measured from finger 7's start: 0 travel.
        let out = c.release_end(7, Point::new(124.0, 347.0), || 0.5);
        assert_eq!(out, ReleaseOutcome::Ignored(Ignored::ShortPull { travelled: 0.0 }));
    }

    #[test]
    fn teardown_drops_any_press() {
        let mut c = controller();
        c.press_start(3, Point::new(0.0, 0.0));
        c.teardown();
        assert!(!c.is_pressed());
    }

    #[test]
    fn drag_never_changes_power() {
        let mut c = controller();
        c.press_start(MOUSE, Point::new(100.0, 300.0));
        let end = c.drag_move(MOUSE, Point::new(100.0, 500.0)).unwrap();
        assert_eq!(end, Point::new(124.0, 548.0));
        assert_eq!(c.power(), LampPower::Off);
        assert!(!c.is_settling());
    }
}
