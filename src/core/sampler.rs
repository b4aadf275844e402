//! Curve sampling and segmentation.
//!
//! A compiled function is walked across the visible, domain-restricted
//! x-range at two samples per device pixel. Invalid points (outside the
//! domain, failed evaluation, non-finite result) and large vertical jumps
//! split the walk into separate segments, which heuristically separates
//! asymptote branches without explicit singularity detection.

use crate::core::axis::XAxisLabels;
use crate::core::equation::{Bound, Equation};
use crate::core::transform::CoordinateTransform;

/// One sampled curve point in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x_dev: f64,
    pub y_dev: f64,
    pub x_math: f64,
    pub y_math: f64,
}

/// A maximal run of mutually continuous sampled points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    pub points: Vec<SamplePoint>,
}

impl Segment {
    /// Segments below two points are never drawn as lines.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Samples one equation into its segments for the current view.
#[must_use]
pub fn sample_equation(
    equation: &Equation,
    transform: &CoordinateTransform,
    x_labels: XAxisLabels,
) -> Vec<Segment> {
    let rect = transform.rect();
    let x_axis = transform.x_axis();

    let sample_count = (rect.width * 2.0).ceil().max(2.0) as usize;
    let step = x_axis.span() / sample_count as f64;
    let epsilon = step * 1e-3;

    // Regular sample grid, plus exact samples at finite domain bounds inside
    // the view so endpoint markers can land on the bound itself.
    let mut xs: Vec<f64> = (0..=sample_count)
        .map(|index| x_axis.min + index as f64 * step)
        .collect();
    for bound in [equation.domain.start, equation.domain.end] {
        if let Bound::At(value) = bound
            && value >= x_axis.min
            && value <= x_axis.max
        {
            // The exact bound replaces any regular sample landing on it, so
            // endpoint markers can find a point at the bound itself.
            xs.retain(|x| (x - value).abs() >= epsilon);
            xs.push(value);
        }
    }
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let jump_threshold = rect.height * 0.5;
    let mut segments: Vec<Segment> = Vec::new();
    let mut current = Segment::default();
    let mut previous_y_dev: Option<f64> = None;

    let mut close_current = |current: &mut Segment, segments: &mut Vec<Segment>| {
        if !current.points.is_empty() {
            segments.push(std::mem::take(current));
        }
    };

    for x_math in xs {
        if !equation.domain.contains(x_math, epsilon) {
            close_current(&mut current, &mut segments);
            previous_y_dev = None;
            continue;
        }

        let Some(y_math) = equation.function.eval(x_labels.to_eval_space(x_math)) else {
            close_current(&mut current, &mut segments);
            previous_y_dev = None;
            continue;
        };

        let (x_dev, y_dev) = transform.to_device(x_math, y_math);
        if let Some(previous) = previous_y_dev
            && (y_dev - previous).abs() > jump_threshold
        {
            close_current(&mut current, &mut segments);
        }

        current.points.push(SamplePoint {
            x_dev,
            y_dev,
            x_math,
            y_math,
        });
        previous_y_dev = Some(y_dev);
    }
    close_current(&mut current, &mut segments);

    segments
}
