//! Curve label auto-placement with overlap avoidance.
//!
//! Labels placed earlier in a redraw claim their rectangle; later labels try a
//! fixed ordered list of candidate offsets around their visual anchor and take
//! the first spot that stays inside the safe area and misses every claimed
//! rectangle. An explicit user-dragged offset always wins and skips the search.

use smallvec::SmallVec;
use tracing::warn;

use crate::core::LabelOffset;
use crate::text::TextExtent;

/// Gap between a label box and its anchor point.
pub const CANDIDATE_GAP_PX: f64 = 10.0;
const OVERLAP_BUFFER_PX: f64 = 2.0;

/// Axis-aligned label bounding box in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelRect {
    #[must_use]
    pub fn overlaps(self, other: Self, buffer: f64) -> bool {
        self.x - buffer < other.x + other.width
            && other.x - buffer < self.x + self.width
            && self.y - buffer < other.y + other.height
            && other.y - buffer < self.y + self.height
    }

    #[must_use]
    fn within(self, outer: Self) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.x + self.width <= outer.x + outer.width
            && self.y + self.height <= outer.y + outer.height
    }
}

/// A resolved label position for one equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    pub rect: LabelRect,
    /// Baseline anchor for the text primitive, left-aligned at `rect.x`.
    pub baseline_x: f64,
    pub baseline_y: f64,
}

/// Per-redraw placement state. Rebuilt for every redraw; claimed rectangles
/// only matter within one pass.
#[derive(Debug)]
pub struct LabelPlacer {
    safe_area: LabelRect,
    placed: Vec<LabelRect>,
}

impl LabelPlacer {
    #[must_use]
    pub fn new(safe_area: LabelRect) -> Self {
        Self {
            safe_area,
            placed: Vec::new(),
        }
    }

    /// Places one label.
    ///
    /// `visual_anchor` is the point the label should sit near (the last
    /// in-plot segment point, or the reference point when none is visible);
    /// `reference` is the stable reference point a persisted `offset` is
    /// relative to.
    pub fn place(
        &mut self,
        extent: TextExtent,
        visual_anchor: (f64, f64),
        reference: (f64, f64),
        offset: Option<LabelOffset>,
    ) -> PlacedLabel {
        let width = extent.width;
        let height = extent.height();

        // Explicit user placement wins outright, centered on the offset point.
        if let Some(offset) = offset {
            let rect = LabelRect {
                x: reference.0 + offset.dx - width * 0.5,
                y: reference.1 + offset.dy - height * 0.5,
                width,
                height,
            };
            self.placed.push(rect);
            return self.resolved(rect, extent);
        }

        let (ax, ay) = visual_anchor;
        let gap = CANDIDATE_GAP_PX;
        let candidates: SmallVec<[LabelRect; 8]> = [
            (gap, -height * 0.5),                 // right
            (-gap - width, -height * 0.5),        // left
            (-width * 0.5, -gap - height),        // above
            (-width * 0.5, gap),                  // below
            (gap, -gap - height),                 // above-right
            (-gap - width, -gap - height),        // above-left
            (gap, gap),                           // below-right
            (-gap - width, gap),                  // below-left
        ]
        .into_iter()
        .map(|(dx, dy)| LabelRect {
            x: ax + dx,
            y: ay + dy,
            width,
            height,
        })
        .collect();

        for rect in candidates.iter().copied() {
            if !rect.within(self.safe_area) {
                continue;
            }
            if self
                .placed
                .iter()
                .any(|placed| rect.overlaps(*placed, OVERLAP_BUFFER_PX))
            {
                continue;
            }
            self.placed.push(rect);
            return self.resolved(rect, extent);
        }

        // Every candidate failed: overlap is visible but the label is never
        // silently dropped.
        warn!("no free label position found, accepting first candidate with overlap");
        let rect = candidates[0];
        self.placed.push(rect);
        self.resolved(rect, extent)
    }

    fn resolved(&self, rect: LabelRect, extent: TextExtent) -> PlacedLabel {
        PlacedLabel {
            rect,
            baseline_x: rect.x,
            baseline_y: rect.y + extent.ascent,
        }
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelPlacer, LabelRect};
    use crate::core::LabelOffset;
    use crate::text::TextExtent;

    fn wide_safe_area() -> LabelRect {
        LabelRect {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 1000.0,
        }
    }

    fn extent() -> TextExtent {
        TextExtent {
            width: 60.0,
            ascent: 10.0,
            descent: 3.0,
        }
    }

    #[test]
    fn coincident_anchors_get_disjoint_rects() {
        let mut placer = LabelPlacer::new(wide_safe_area());
        let anchor = (500.0, 500.0);
        let first = placer.place(extent(), anchor, anchor, None);
        let second = placer.place(extent(), anchor, anchor, None);
        assert!(!first.rect.overlaps(second.rect, 0.0));
    }

    #[test]
    fn explicit_offset_skips_search_and_centers() {
        let mut placer = LabelPlacer::new(wide_safe_area());
        let reference = (200.0, 300.0);
        let placed = placer.place(
            extent(),
            (999.0, 999.0),
            reference,
            Some(LabelOffset { dx: 40.0, dy: -20.0 }),
        );
        assert!((placed.rect.x - (240.0 - 30.0)).abs() < 1e-9);
        assert!((placed.rect.y - (280.0 - 6.5)).abs() < 1e-9);
    }

    #[test]
    fn exhaustion_falls_back_to_first_candidate() {
        let mut placer = LabelPlacer::new(wide_safe_area());
        let anchor = (500.0, 500.0);
        // Saturate every candidate position around the anchor.
        for _ in 0..9 {
            placer.place(extent(), anchor, anchor, None);
        }
        let count_before = placer.placed_count();
        let fallback = placer.place(extent(), anchor, anchor, None);
        assert_eq!(placer.placed_count(), count_before + 1);
        // First candidate sits to the right of the anchor.
        assert!(fallback.rect.x > anchor.0);
    }
}
