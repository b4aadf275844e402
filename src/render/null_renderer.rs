use crate::error::GridResult;
use crate::render::{Primitive, Renderer, Scene};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates scene content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_polyline_count: usize,
    pub last_polygon_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> GridResult<()> {
        scene.validate()?;
        self.last_line_count = scene.count_of(|p| matches!(p, Primitive::Line(_)));
        self.last_polyline_count = scene.count_of(|p| matches!(p, Primitive::Polyline(_)));
        self.last_polygon_count = scene.count_of(|p| matches!(p, Primitive::Polygon(_)));
        self.last_circle_count = scene.count_of(|p| matches!(p, Primitive::Circle(_)));
        self.last_text_count = scene.count_of(|p| matches!(p, Primitive::Text(_)));
        Ok(())
    }
}
