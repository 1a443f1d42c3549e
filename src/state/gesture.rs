// Pull-cord gesture tracking: press, drag proxy, release distance.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = (other.x - self.x).abs();
        let dy = (other.y - self.y).abs();
        (dx * dx + dy * dy).sqrt()
    }
}

/// Start and end of one press/release, kept only until the release is judged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    pub start: Point,
    pub end: Point,
}

impl DragSample {
    pub fn travelled(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}

/// Browser pointer id (`PointerEvent.pointerId`).
pub type PointerId = i32;

/// Tracks the gesture in progress and the cord-end proxy that follows it.
/// Only the pointer that pressed may drag, release or cancel it.
#[derive(Clone, Debug)]
pub struct PullGesture {
    start: Option<(PointerId, Point)>,
    rest: Point,
    drag_min_y: f64,
}

impl PullGesture {
    pub fn new(rest: Point, drag_min_y: f64) -> Self {
        Self {
            start: None,
            rest,
            drag_min_y,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }

    fn start_for(&self, pointer: PointerId) -> Option<Point> {
        match self.start {
            Some((id, at)) if id == pointer => Some(at),
            _ => None,
        }
    }

    /// Records the press. Returns false (and keeps the first press) while
    /// another pointer already holds the cord.
    pub fn press(&mut self, pointer: PointerId, at: Point) -> bool {
        if self.start.is_some() {
            return false;
        }
        self.start = Some((pointer, at));
        true
    }

    /// Position of the dragged cord end, or `None` when `pointer` holds no press.
    pub fn drag(&self, pointer: PointerId, at: Point) -> Option<Point> {
        let start = self.start_for(pointer)?;
        let x = self.rest.x + (at.x - start.x);
        let y = self.rest.y + (at.y - start.y);
        Some(Point::new(x, y.max(self.drag_min_y)))
    }

    /// Ends the gesture. Returns `None` when `pointer` has no matching press;
    /// the press of another pointer is left alone.
    pub fn release(&mut self, pointer: PointerId, at: Point) -> Option<DragSample> {
        let start = self.start_for(pointer)?;
        self.start = None;
        Some(DragSample { start, end: at })
    }

    /// Drops the press if `pointer` owns it. Returns whether anything was dropped.
    pub fn cancel(&mut self, pointer: PointerId) -> bool {
        if self.start_for(pointer).is_none() {
            return false;
        }
        self.start = None;
        true
    }

    /// Drops whatever press is active.
    pub fn clear(&mut self) {
        self.start = None;
    }
}

/// Maps client (CSS pixel) coordinates into the SVG viewBox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMap {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ViewportMap {
    pub fn from_rect(left: f64, top: f64, width: f64, height: f64, view_w: f64, view_h: f64) -> Self {
        let scale = |px: f64, units: f64| if px > 0.0 { units / px } else { 1.0 };
        Self {
            left,
            top,
            scale_x: scale(width, view_w),
            scale_y: scale(height, view_h),
        }
    }

    pub fn to_view(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(
            (client_x - self.left) * self.scale_x,
            (client_y - self.top) * self.scale_y,
        )
    }
}
