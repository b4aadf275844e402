//! Margin layout.
//!
//! Margins are derived from measured text so no tick label, axis title or
//! curve label is clipped. The computation is pure and idempotent: it is
//! re-run from scratch on every input change and keeps no state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{EquationSet, GridConfig, PaperStyle, ResolvedAxis, XAxisLabels};
use crate::text::{TextExtent, TextMeasurer};

/// Every margin keeps at least this much room regardless of content.
pub const MIN_MARGIN_PX: f64 = 20.0;
/// Gap between tick numerals and the plot edge.
pub const TICK_LABEL_PADDING_PX: f64 = 8.0;
/// Extra spacing when an axis title occupies its own band.
pub const TITLE_BAND_SPACING_PX: f64 = 14.0;
/// Room reserved for arrowheads past the plot edge.
pub const ARROW_RESERVE_PX: f64 = 14.0;
/// Buffer past the widest equation label on the right.
pub const EQUATION_LABEL_BUFFER_PX: f64 = 12.0;

/// The four margins around the plotting area, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            left: MIN_MARGIN_PX,
            right: MIN_MARGIN_PX,
            top: MIN_MARGIN_PX,
            bottom: MIN_MARGIN_PX,
        }
    }
}

/// Computes margins for the current configuration and equation collection.
#[must_use]
pub fn compute_margins(
    config: &GridConfig,
    equations: &EquationSet,
    measurer: &dyn TextMeasurer,
) -> Margins {
    if config.paper_style == PaperStyle::Polar {
        // Polar paper has no tick numerals or curve labels.
        return Margins::minimal();
    }

    let (Ok(x_axis), Ok(y_axis)) = (
        config.x_labels.resolve(&config.x_axis, "x"),
        XAxisLabels::Numbers.resolve(&config.y_axis, "y"),
    ) else {
        // Engine validation rejects these configs before drawing.
        return Margins::minimal();
    };

    let font = config.font_size_px;

    let mut max_y_label_width = 0.0_f64;
    for value in labeled_ticks(y_axis, config.y_axis.label_every, config.y_axis.label_on_zero) {
        let text = XAxisLabels::Numbers.format_tick(value);
        max_y_label_width = max_y_label_width.max(measure_or_zero(measurer, &text, font).width);
    }

    let mut max_x_label_height = 0.0_f64;
    for value in labeled_ticks(x_axis, config.x_axis.label_every, config.x_axis.label_on_zero) {
        let text = config.x_labels.format_tick(value);
        max_x_label_height = max_x_label_height.max(measure_or_zero(measurer, &text, font).height());
    }

    // Left: numerals beside the plot, plus a rotated title band when present.
    let mut left = max_y_label_width + TICK_LABEL_PADDING_PX;
    if let Some(title) = &config.y_axis.title {
        let extent = measure_or_zero(measurer, title, font);
        left += TITLE_BAND_SPACING_PX + extent.height();
    }

    // Bottom: numerals below the plot, plus a title band when present.
    let mut bottom = max_x_label_height + TICK_LABEL_PADDING_PX;
    if let Some(title) = &config.x_axis.title {
        let extent = measure_or_zero(measurer, title, font);
        bottom += TITLE_BAND_SPACING_PX + extent.height();
    }

    // Right: room for the widest visible equation label.
    let mut max_equation_label_width = 0.0_f64;
    for equation in equations.iter() {
        if let Some(text) = equation.label_text() {
            max_equation_label_width =
                max_equation_label_width.max(measure_or_zero(measurer, text, font).width);
        }
    }
    let mut right = max_equation_label_width + EQUATION_LABEL_BUFFER_PX;

    let mut top = MIN_MARGIN_PX;
    if config.show_axis_arrows {
        top += ARROW_RESERVE_PX;
        right += ARROW_RESERVE_PX;
    }

    Margins {
        left: left.max(MIN_MARGIN_PX),
        right: right.max(MIN_MARGIN_PX),
        top: top.max(MIN_MARGIN_PX),
        bottom: bottom.max(MIN_MARGIN_PX),
    }
}

/// Yields the axis values that receive a numeral, honoring the label stride
/// and the zero-suppression rule.
pub(crate) fn labeled_ticks(
    axis: ResolvedAxis,
    label_every: u32,
    label_on_zero: bool,
) -> impl Iterator<Item = f64> {
    let cell_count = axis.cell_count();
    (0..=cell_count).filter_map(move |index| {
        if label_every == 0 || index as u32 % label_every != 0 {
            return None;
        }
        let value = axis.min + index as f64 * axis.cell_value;
        let is_zero = value.abs() < axis.cell_value * 1e-9;
        if is_zero && !label_on_zero {
            return None;
        }
        Some(value)
    })
}

pub(crate) fn measure_or_zero(
    measurer: &dyn TextMeasurer,
    text: &str,
    font_size_px: f64,
) -> TextExtent {
    match measurer.measure(text, font_size_px) {
        Ok(extent) => extent,
        Err(error) => {
            warn!(%error, text, "text measurement failed, substituting zero extent");
            TextExtent::ZERO
        }
    }
}
