mod null_renderer;
mod primitives;
mod scene;

pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, PolylinePrimitive, StrokeStyle,
    TextHAlign, TextPrimitive,
};
pub use scene::{Primitive, Scene};

use crate::error::GridResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `Scene` so drawing
/// code remains isolated from layout and equation logic. Rasterization to
/// bitmap or page formats happens entirely behind this seam.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> GridResult<()>;
}
