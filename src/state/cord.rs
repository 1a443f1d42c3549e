// Cord animation: the dummy cord's snap-back tween and the rig morph sequence.
// Morph completion is the settle-complete event that releases the toggle guard.

use super::gesture::Point;

/// Frame order for the morph: base -> shape 1 -> base -> shape 2 -> ... -> base.
pub fn morph_frames(rig_count: usize) -> Vec<usize> {
    (1..rig_count).flat_map(|i| [i, 0]).collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DummyCord {
    Rest,
    Dragging(Point),
    SnapBack { from: Point, elapsed: f64 },
}

/// What the view should draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CordView {
    pub dummy_end: Point,
    /// Rig shape to show instead of the dummy cord while morphing.
    pub rig_frame: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CordTick {
    /// The morph finished during this tick.
    pub settled: bool,
    /// More ticks are needed.
    pub animating: bool,
}

#[derive(Clone, Debug)]
pub struct CordTimeline {
    rest: Point,
    snap_back_ms: f64,
    morph_step_ms: f64,
    frames: Vec<usize>,
    dummy: DummyCord,
    morph_elapsed: Option<f64>,
}

impl CordTimeline {
    pub fn new(rest: Point, snap_back_ms: f64, morph_step_ms: f64, rig_count: usize) -> Self {
        Self {
            rest,
            snap_back_ms: snap_back_ms.max(0.0),
            morph_step_ms: morph_step_ms.max(1.0),
            frames: morph_frames(rig_count),
            dummy: DummyCord::Rest,
            morph_elapsed: None,
        }
    }

    pub fn drag_to(&mut self, end: Point) {
        self.dummy = DummyCord::Dragging(end);
    }

    /// Snap the dummy cord back from wherever it was released.
    pub fn snap_back(&mut self) {
        let from = self.dummy_end();
        self.dummy = if from == self.rest {
            DummyCord::Rest
        } else {
            DummyCord::SnapBack { from, elapsed: 0.0 }
        };
    }

    /// Starts the morph; restarts it if one is already running.
    pub fn start_morph(&mut self) {
        self.morph_elapsed = Some(0.0);
    }

    pub fn is_morphing(&self) -> bool {
        self.morph_elapsed.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.is_morphing() || matches!(self.dummy, DummyCord::SnapBack { .. })
    }

    pub fn advance(&mut self, dt_ms: f64) -> CordTick {
        let dt = dt_ms.max(0.0);
        if let DummyCord::SnapBack { from, elapsed } = self.dummy {
            let elapsed = elapsed + dt;
            self.dummy = if elapsed >= self.snap_back_ms {
                DummyCord::Rest
            } else {
                DummyCord::SnapBack { from, elapsed }
            };
        }
        let mut settled = false;
        if let Some(elapsed) = self.morph_elapsed {
            let elapsed = elapsed + dt;
            let total = self.morph_step_ms * self.frames.len() as f64;
            if elapsed >= total {
                self.morph_elapsed = None;
                settled = true;
                // The rig hides the dummy while morphing; it reappears at rest.
                if !matches!(self.dummy, DummyCord::Dragging(_)) {
                    self.dummy = DummyCord::Rest;
                }
            } else {
                self.morph_elapsed = Some(elapsed);
            }
        }
        CordTick {
            settled,
            animating: self.is_animating(),
        }
    }

    fn dummy_end(&self) -> Point {
        match self.dummy {
            DummyCord::Rest => self.rest,
            DummyCord::Dragging(p) => p,
            DummyCord::SnapBack { from, elapsed } => {
                let t = if self.snap_back_ms > 0.0 {
                    (elapsed / self.snap_back_ms).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                // ease-out quad
                let t = 1.0 - (1.0 - t) * (1.0 - t);
                Point::new(
                    from.x + (self.rest.x - from.x) * t,
                    from.y + (self.rest.y - from.y) * t,
                )
            }
        }
    }

    pub fn view(&self) -> CordView {
        let rig_frame = self.morph_elapsed.map(|elapsed| {
            let step = (elapsed / self.morph_step_ms).floor() as usize;
            self.frames
                .get(step)
                .or(self.frames.last())
                .copied()
                .unwrap_or(0)
        });
        CordView {
            dummy_end: self.dummy_end(),
            rig_frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST: Point = Point::new(124.0, 348.0);

    fn timeline() -> CordTimeline {
        CordTimeline::new(REST, 100.0, 100.0, 6)
    }

    #[test]
    fn morph_alternates_with_base_shape() {
        assert_eq!(morph_frames(6), vec![1, 0, 2, 0, 3, 0, 4, 0, 5, 0]);
        assert!(morph_frames(1).is_empty());
        assert!(morph_frames(0).is_empty());
    }

    #[test]
    fn snap_back_lands_exactly_on_rest() {
        let mut t = timeline();
        t.drag_to(Point::new(150.0, 500.0));
        assert_eq!(t.view().dummy_end, Point::new(150.0, 500.0));
        t.snap_back();
        assert!(t.is_animating());
        let tick = t.advance(50.0);
        assert!(tick.animating);
        let mid = t.view().dummy_end;
        assert!(mid.y < 500.0 && mid.y > REST.y);
        let tick = t.advance(60.0);
        assert!(!tick.animating);
        assert!(!tick.settled);
        assert_eq!(t.view().dummy_end, REST);
    }

    #[test]
    fn snap_back_from_rest_is_instant() {
        let mut t = timeline();
        t.snap_back();
        assert!(!t.is_animating());
    }

    #[test]
    fn morph_settles_once_after_all_frames() {
        let mut t = timeline();
        t.start_morph();
        assert_eq!(t.view().rig_frame, Some(1));
        t.advance(150.0);
        assert_eq!(t.view().rig_frame, Some(0));
        t.advance(300.0);
        assert_eq!(t.view().rig_frame, Some(3));
        let tick = t.advance(540.0);
        assert!(tick.animating);
        assert!(!tick.settled);
        let tick = t.advance(20.0);
        assert!(tick.settled);
        assert!(!tick.animating);
        assert_eq!(t.view().rig_frame, None);
        assert!(!t.advance(16.0).settled);
    }

    #[test]
    fn dragging_during_morph_does_not_stop_it() {
        let mut t = timeline();
        t.start_morph();
        t.drag_to(Point::new(130.0, 450.0));
        t.advance(300.0);
        assert!(t.is_morphing());
        let tick = t.advance(800.0);
        assert!(tick.settled);
        // Still held by the pointer after settling.
        assert_eq!(t.view().dummy_end, Point::new(130.0, 450.0));
    }
}
