//! Endpoint markers: boundary dots for closed domain ends, directional
//! arrows where a curve leaves the plot with an unbounded domain.

use smallvec::SmallVec;

use crate::core::equation::{Bound, Equation};
use crate::core::sampler::{SamplePoint, Segment};
use crate::core::transform::PlotRect;

/// Marker decided for one visible end of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndpointMarker {
    Dot { x: f64, y: f64 },
    /// `angle` is the crossing direction in radians, device space.
    Arrow { x: f64, y: f64, angle: f64 },
}

/// Decides markers for the start of the first segment and the end of the
/// last segment. Segments with fewer than two points get no marker.
#[must_use]
pub fn endpoint_markers(
    equation: &Equation,
    segments: &[Segment],
    rect: PlotRect,
) -> SmallVec<[EndpointMarker; 2]> {
    let mut markers = SmallVec::new();
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return markers;
    };

    if let Some(marker) = marker_for_end(&first.points, equation.domain.start, rect, true) {
        markers.push(marker);
    }
    if let Some(marker) = marker_for_end(&last.points, equation.domain.end, rect, false) {
        markers.push(marker);
    }
    markers
}

fn marker_for_end(
    points: &[SamplePoint],
    bound: Bound,
    rect: PlotRect,
    at_start: bool,
) -> Option<EndpointMarker> {
    if points.len() < 2 {
        return None;
    }

    let endpoint = if at_start {
        points[0]
    } else {
        points[points.len() - 1]
    };

    // Closed bound sampled exactly and strictly inside the plot: a dot on the
    // bound itself. The sampler guarantees an exact sample at in-view bounds.
    if let Bound::At(value) = bound
        && (endpoint.x_math - value).abs() <= f64::EPSILON * value.abs().max(1.0)
        && rect.strictly_contains(endpoint.x_dev, endpoint.y_dev)
    {
        return Some(EndpointMarker::Dot {
            x: endpoint.x_dev,
            y: endpoint.y_dev,
        });
    }

    // Otherwise the curve must cross the plot boundary near this end.
    let mut ordered: Box<dyn Iterator<Item = usize>> = if at_start {
        Box::new(0..points.len())
    } else {
        Box::new((0..points.len()).rev())
    };
    let inside_index = ordered
        .find(|&index| rect.strictly_contains(points[index].x_dev, points[index].y_dev))?;

    let outside_index = if at_start {
        inside_index.checked_sub(1)?
    } else {
        (inside_index + 1 < points.len()).then_some(inside_index + 1)?
    };

    let inside = points[inside_index];
    let outside = points[outside_index];
    let (cx, cy) = clip_exit_point(
        (inside.x_dev, inside.y_dev),
        (outside.x_dev, outside.y_dev),
        rect,
    )?;

    match bound {
        Bound::At(_) => Some(EndpointMarker::Dot { x: cx, y: cy }),
        Bound::Open => Some(EndpointMarker::Arrow {
            x: cx,
            y: cy,
            angle: (outside.y_dev - inside.y_dev).atan2(outside.x_dev - inside.x_dev),
        }),
    }
}

/// Parametric clip of the segment from an inside point toward an outside
/// point against the rectangle, returning the exact exit intersection.
pub(crate) fn clip_exit_point(
    inside: (f64, f64),
    outside: (f64, f64),
    rect: PlotRect,
) -> Option<(f64, f64)> {
    let (x0, y0) = inside;
    let (x1, y1) = outside;
    let dx = x1 - x0;
    let dy = y1 - y0;

    let mut t_exit = f64::INFINITY;
    for (p, q) in [
        (-dx, x0 - rect.x),
        (dx, rect.right() - x0),
        (-dy, y0 - rect.y),
        (dy, rect.bottom() - y0),
    ] {
        if p > 0.0 {
            t_exit = t_exit.min(q / p);
        }
    }

    if !t_exit.is_finite() || !(0.0..=1.0).contains(&t_exit) {
        return None;
    }
    Some((x0 + dx * t_exit, y0 + dy * t_exit))
}

/// Triangle outline for an arrowhead whose tip sits at `(x, y)` pointing
/// along `angle`.
#[must_use]
pub fn arrow_polygon(x: f64, y: f64, angle: f64, size: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = angle.sin_cos();
    let back_x = x - cos * size;
    let back_y = y - sin * size;
    let half_width = size * 0.45;
    let (px, py) = (-sin, cos);
    vec![
        (x, y),
        (back_x + px * half_width, back_y + py * half_width),
        (back_x - px * half_width, back_y - py * half_width),
    ]
}

#[cfg(test)]
mod tests {
    use super::clip_exit_point;
    use crate::core::transform::PlotRect;

    #[test]
    fn clip_finds_right_edge_intersection() {
        let rect = PlotRect::new(0.0, 0.0, 100.0, 100.0);
        let exit = clip_exit_point((90.0, 50.0), (110.0, 70.0), rect).expect("exit");
        assert!((exit.0 - 100.0).abs() < 1e-9);
        assert!((exit.1 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn clip_with_outside_point_on_boundary_returns_it() {
        let rect = PlotRect::new(0.0, 0.0, 100.0, 100.0);
        let exit = clip_exit_point((10.0, 50.0), (0.0, 50.0), rect).expect("exit");
        assert_eq!(exit, (0.0, 50.0));
    }

    #[test]
    fn clip_fails_when_both_points_inside() {
        let rect = PlotRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(clip_exit_point((10.0, 50.0), (20.0, 50.0), rect).is_none());
    }
}
