//! Text measurement capability.
//!
//! Margin layout and label placement both need text extents before anything is
//! drawn, so measurement is a side-effect-free injected seam rather than a
//! property of any rendering backend. Hosts with a shaping library plug in
//! their own implementation; the heuristic measurer keeps the engine
//! deterministic and testable headless.

use crate::error::GridResult;

/// Measured extent of one run of text in device units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextExtent {
    pub const ZERO: Self = Self {
        width: 0.0,
        ascent: 0.0,
        descent: 0.0,
    };

    #[must_use]
    pub fn height(self) -> f64 {
        self.ascent + self.descent
    }
}

/// Contract for side-effect-free text measurement.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> GridResult<TextExtent>;
}

/// Deterministic, backend-independent width estimate from a per-character table.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> GridResult<TextExtent> {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'π' | '°' => 0.55,
                _ => 0.58,
            }
        });

        Ok(TextExtent {
            width: units * font_size_px,
            ascent: font_size_px * 0.78,
            descent: font_size_px * 0.22,
        })
    }
}
