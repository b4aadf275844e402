mod engine;
mod grid_scene;
mod label_placer;
mod scheduler;

pub use engine::{GridEngine, RedrawInput, RedrawOutput};
pub use label_placer::{CANDIDATE_GAP_PX, LabelPlacer, LabelRect, PlacedLabel};
pub use scheduler::{DEFAULT_DRAG_RETRY, DEFAULT_QUIET_PERIOD, RedrawScheduler};
