mod camera;
mod input;
mod loop_runner;
mod metrics;
mod overlay;
mod rendering;
mod scene;
pub mod text;

pub use camera::{Camera, Viewport};
pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub(crate) use overlay::OverlayData;
pub use rendering::{Canvas, PixelBuffer};
pub use scene::{InputSnapshot, Rect, Scene, SceneCommand, Vec2};
