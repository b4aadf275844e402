//! Inequality region construction.
//!
//! For a non-equality relation the sampled curve is clamped into the plot
//! rectangle and closed along the bottom or top edge into a fillable polygon.

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::equation::Relation;
use crate::core::sampler::Segment;
use crate::core::transform::PlotRect;

/// Builds the fill polygon for an inequality, clipped to the plot rectangle.
///
/// `probe` evaluates the raw function at a mathematical x and returns the
/// unclamped device y; it is consulted only when no sampled point is visible.
/// `probe_xs` are candidate probe positions just outside the view boundary.
///
/// Returns `None` for `Relation::Eq` and when no region can be established.
#[must_use]
pub fn build_region(
    relation: Relation,
    segments: &[Segment],
    rect: PlotRect,
    probe: impl Fn(f64) -> Option<f64>,
    probe_xs: [f64; 2],
) -> Option<Vec<(f64, f64)>> {
    let close_y = match relation {
        Relation::Eq => return None,
        Relation::Lt | Relation::Le => rect.bottom(),
        Relation::Gt | Relation::Ge => rect.y,
    };

    let mut points: Vec<(f64, f64)> = segments
        .iter()
        .flat_map(|segment| segment.points.iter())
        .map(|point| (point.x_dev, point.y_dev.clamp(rect.y, rect.bottom())))
        .collect();

    if points.is_empty() {
        return full_rect_fallback(relation, rect, probe, probe_xs);
    }

    points.sort_by_key(|(x, _)| OrderedFloat(*x));
    points.push((rect.right(), close_y));
    points.push((rect.x, close_y));
    Some(points)
}

/// Off-view fallback: one probe just outside the boundary decides whether the
/// whole rectangle is inside the half-plane, so a region is never silently
/// omitted for off-screen curves.
///
/// Known heuristic limitation: a single probe can mis-shade non-monotonic
/// functions whose side of the midline differs far from the probe.
fn full_rect_fallback(
    relation: Relation,
    rect: PlotRect,
    probe: impl Fn(f64) -> Option<f64>,
    probe_xs: [f64; 2],
) -> Option<Vec<(f64, f64)>> {
    let probe_y = probe_xs.into_iter().find_map(&probe)?;
    let midline = rect.y + rect.height * 0.5;

    let whole_rect_satisfied = match relation {
        Relation::Lt | Relation::Le => probe_y < midline,
        Relation::Gt | Relation::Ge => probe_y > midline,
        Relation::Eq => false,
    };

    if !whole_rect_satisfied {
        return None;
    }

    debug!("shading fallback: curve off-view, filling entire plot rectangle");
    Some(vec![
        (rect.x, rect.y),
        (rect.right(), rect.y),
        (rect.right(), rect.bottom()),
        (rect.x, rect.bottom()),
    ])
}
