//! Redraw orchestration.
//!
//! One `redraw` call runs the whole pipeline synchronously: margin layout,
//! transform construction, paper background, then per equation sampling,
//! shading, markers and label placement. The resulting scene and published
//! transform are handed back to the host; nothing is retained between calls
//! except the scene epoch used to detect stale drag gestures.

use crate::api::grid_scene;
use crate::api::label_placer::{LabelPlacer, LabelRect};
use crate::core::{
    CoordinateTransform, EndpointMarker, Equation, EquationId, EquationSet, GridConfig, PaperStyle,
    PlotRect, PublishedTransform, Viewport, XAxisLabels, arrow_polygon, build_region,
    endpoint_markers, sample_equation,
};
use crate::core::Segment;
use crate::error::GridResult;
use crate::layout::{self, Margins};
use crate::render::{
    CirclePrimitive, PolygonPrimitive, PolylinePrimitive, Scene, TextHAlign, TextPrimitive,
};
use crate::text::{HeuristicTextMeasurer, TextMeasurer};

const CURVE_STROKE_WIDTH: f64 = 2.0;
const ENDPOINT_DOT_RADIUS: f64 = 3.5;
const ENDPOINT_ARROW_SIZE: f64 = 9.0;
const SHADING_ALPHA: f64 = 0.18;
const SAFE_AREA_INSET_PX: f64 = 2.0;

/// Borrowed inputs for one redraw. Configuration is rebuilt by the host for
/// every call; the equation collection persists across calls and is only
/// read here.
#[derive(Debug, Clone, Copy)]
pub struct RedrawInput<'a> {
    pub config: &'a GridConfig,
    pub equations: &'a EquationSet,
}

/// Result of one successful redraw.
#[derive(Debug)]
pub struct RedrawOutput {
    pub scene: Scene,
    /// Cartesian mapping for external overlays, `None` for polar paper.
    pub transform: Option<PublishedTransform>,
    /// Stable per-equation reference points in device space, the basis for
    /// persisted label offsets.
    pub references: Vec<(EquationId, (f64, f64))>,
    /// Monotonically increasing scene identity; a drag begun under an older
    /// epoch is discarded at commit.
    pub epoch: u64,
}

impl RedrawOutput {
    #[must_use]
    pub fn reference_for(&self, id: EquationId) -> Option<(f64, f64)> {
        self.references
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, point)| *point)
    }
}

/// The grid layout and equation-rendering engine.
pub struct GridEngine {
    measurer: Box<dyn TextMeasurer>,
    epoch: u64,
}

impl GridEngine {
    #[must_use]
    pub fn new(measurer: Box<dyn TextMeasurer>) -> Self {
        Self { measurer, epoch: 0 }
    }

    /// Engine backed by the deterministic heuristic text measurer.
    #[must_use]
    pub fn with_heuristic_text() -> Self {
        Self::new(Box::new(HeuristicTextMeasurer))
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Runs one full redraw.
    ///
    /// A configuration error aborts before any primitive is produced; the
    /// host keeps showing its previous scene (or a placeholder) in that case.
    /// Per-equation evaluation failures never abort the redraw.
    pub fn redraw(&mut self, input: RedrawInput<'_>) -> GridResult<RedrawOutput> {
        input.config.validate()?;
        let margins = layout::compute_margins(input.config, input.equations, self.measurer.as_ref());

        match input.config.paper_style {
            PaperStyle::Polar => self.redraw_polar(input.config, margins),
            PaperStyle::Grid | PaperStyle::Dot => {
                self.redraw_cartesian(input.config, input.equations, margins)
            }
        }
    }

    fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    fn redraw_polar(&mut self, config: &GridConfig, margins: Margins) -> GridResult<RedrawOutput> {
        let radius = f64::from(config.polar.circle_count) * config.square_size_px;
        let size = radius * 2.0;
        let viewport = Viewport::new(
            (margins.left + size + margins.right).ceil() as u32,
            (margins.top + size + margins.bottom).ceil() as u32,
        );

        let mut scene = Scene::new(viewport);
        grid_scene::build_polar_paper(
            &mut scene,
            config,
            (margins.left + radius, margins.top + radius),
        );

        Ok(RedrawOutput {
            scene,
            transform: None,
            references: Vec::new(),
            epoch: self.next_epoch(),
        })
    }

    fn redraw_cartesian(
        &mut self,
        config: &GridConfig,
        equations: &EquationSet,
        margins: Margins,
    ) -> GridResult<RedrawOutput> {
        let (plot_width, plot_height) = CoordinateTransform::plot_size(config)?;
        let rect = PlotRect::new(margins.left, margins.top, plot_width, plot_height);
        let transform = CoordinateTransform::new(config, rect)?;
        let viewport = Viewport::new(
            (margins.left + plot_width + margins.right).ceil() as u32,
            (margins.top + plot_height + margins.bottom).ceil() as u32,
        );

        let mut scene = Scene::new(viewport);
        grid_scene::build_cartesian_paper(&mut scene, config, &transform, self.measurer.as_ref());

        let safe_area = LabelRect {
            x: SAFE_AREA_INSET_PX,
            y: SAFE_AREA_INSET_PX,
            width: f64::from(viewport.width) - 2.0 * SAFE_AREA_INSET_PX,
            height: f64::from(viewport.height) - 2.0 * SAFE_AREA_INSET_PX,
        };
        let mut placer = LabelPlacer::new(safe_area);
        let mut references = Vec::with_capacity(equations.len());
        let x_labels = config.x_labels;
        let x_axis = transform.x_axis();

        for equation in equations.iter() {
            let segments = sample_equation(equation, &transform, x_labels);

            if equation.relation.is_inequality() {
                let span = x_axis.span();
                let probe_xs = [x_axis.min - span * 0.01, x_axis.max + span * 0.01];
                let probe = |x: f64| {
                    equation
                        .function
                        .eval(x_labels.to_eval_space(x))
                        .map(|y| transform.to_device(x, y).1)
                };
                if let Some(points) =
                    build_region(equation.relation, &segments, rect, probe, probe_xs)
                {
                    scene.push(PolygonPrimitive::new(
                        points,
                        equation.color.with_alpha(SHADING_ALPHA),
                    ));
                }
            }

            for segment in &segments {
                if segment.is_drawable() {
                    scene.push(
                        PolylinePrimitive::new(
                            segment.points.iter().map(|p| (p.x_dev, p.y_dev)).collect(),
                            CURVE_STROKE_WIDTH,
                            equation.color,
                        )
                        .with_stroke_style(equation.line_style),
                    );
                }
            }

            if equation.show_endpoint_markers {
                for marker in endpoint_markers(equation, &segments, rect) {
                    match marker {
                        EndpointMarker::Dot { x, y } => scene.push(CirclePrimitive::filled(
                            x,
                            y,
                            ENDPOINT_DOT_RADIUS,
                            equation.color,
                        )),
                        EndpointMarker::Arrow { x, y, angle } => scene.push(
                            PolygonPrimitive::new(
                                arrow_polygon(x, y, angle, ENDPOINT_ARROW_SIZE),
                                equation.color,
                            ),
                        ),
                    }
                }
            }

            let reference = reference_point(equation, &transform, x_labels);
            references.push((equation.id(), reference));

            if let Some(text) = equation.label_text() {
                let extent = layout::measure_or_zero(
                    self.measurer.as_ref(),
                    text,
                    config.font_size_px,
                );
                let anchor = visual_anchor(&segments, rect).unwrap_or(reference);
                let placed = placer.place(extent, anchor, reference, equation.label_offset);
                scene.push(TextPrimitive::new(
                    text,
                    placed.baseline_x,
                    placed.baseline_y,
                    config.font_size_px,
                    equation.color,
                    TextHAlign::Left,
                ));
            }
        }

        Ok(RedrawOutput {
            scene,
            transform: Some(transform.published()),
            references,
            epoch: self.next_epoch(),
        })
    }
}

/// Stable mathematical anchor for a label, reproducible across redraws so a
/// persisted offset stays valid: f at the visible midpoint, falling back to
/// the right edge, then to a fixed relative plot position.
fn reference_point(
    equation: &Equation,
    transform: &CoordinateTransform,
    x_labels: XAxisLabels,
) -> (f64, f64) {
    let x_axis = transform.x_axis();
    for x in [(x_axis.min + x_axis.max) * 0.5, x_axis.max] {
        if equation.domain.contains(x, 1e-9)
            && let Some(y) = equation.function.eval(x_labels.to_eval_space(x))
        {
            return transform.to_device(x, y);
        }
    }
    let rect = transform.rect();
    (rect.x + rect.width * 0.75, rect.y + rect.height * 0.25)
}

/// Last sampled point inside the plot rectangle, scanning from the curve's
/// right end.
fn visual_anchor(segments: &[Segment], rect: PlotRect) -> Option<(f64, f64)> {
    segments
        .iter()
        .rev()
        .flat_map(|segment| segment.points.iter().rev())
        .find(|point| rect.contains(point.x_dev, point.y_dev))
        .map(|point| (point.x_dev, point.y_dev))
}
