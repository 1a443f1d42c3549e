pub mod controller;
pub mod cord;
pub mod gesture;
pub mod guard;

pub use controller::{Ignored, LampController, ReleaseOutcome};
pub use cord::{CordTimeline, CordView};
pub use gesture::{Point, ViewportMap};
