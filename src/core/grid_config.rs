use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis::{AxisConfig, XAxisLabels};
use crate::error::GridResult;
use crate::render::Color;

/// Background rendering mode of the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaperStyle {
    #[default]
    Grid,
    Dot,
    Polar,
}

/// Settings that only apply to `PaperStyle::Polar`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarConfig {
    pub circle_count: u32,
    pub radial_count: u32,
    pub sweep_degrees: f64,
}

impl Default for PolarConfig {
    fn default() -> Self {
        Self {
            circle_count: 8,
            radial_count: 12,
            sweep_degrees: 360.0,
        }
    }
}

impl PolarConfig {
    pub fn validate(&self) -> GridResult<()> {
        use crate::error::GridError;
        if self.circle_count == 0 || self.radial_count == 0 {
            return Err(GridError::InvalidConfig(
                "polar paper needs at least one circle and one radial".to_owned(),
            ));
        }
        if !self.sweep_degrees.is_finite() || self.sweep_degrees <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "polar sweep must be finite and > 0 degrees (got {})",
                self.sweep_degrees
            )));
        }
        Ok(())
    }
}

/// Full configuration for one redraw, rebuilt from host input every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub x_labels: XAxisLabels,
    /// Device-pixel size of one minor grid cell.
    pub square_size_px: f64,
    pub paper_style: PaperStyle,
    pub show_main_axes: bool,
    pub show_axis_arrows: bool,
    pub grid_color: Color,
    pub major_color: Color,
    pub font_size_px: f64,
    pub polar: PolarConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            x_labels: XAxisLabels::Numbers,
            square_size_px: 24.0,
            paper_style: PaperStyle::Grid,
            show_main_axes: true,
            show_axis_arrows: false,
            grid_color: Color::rgb(0.63, 0.78, 0.93),
            major_color: Color::rgb(0.20, 0.20, 0.20),
            font_size_px: 12.0,
            polar: PolarConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> GridResult<()> {
        use crate::error::GridError;

        if !self.square_size_px.is_finite() || self.square_size_px <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "square size must be finite and > 0 px (got {})",
                self.square_size_px
            )));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "font size must be finite and > 0 px (got {})",
                self.font_size_px
            )));
        }

        match self.paper_style {
            PaperStyle::Polar => self.polar.validate(),
            PaperStyle::Grid | PaperStyle::Dot => {
                // Derivation validates both axis ranges and cell values.
                self.x_labels.resolve(&self.x_axis, "x")?;
                XAxisLabels::Numbers.resolve(&self.y_axis, "y")?;
                Ok(())
            }
        }
    }

    /// Builds a config from loosely typed host input.
    ///
    /// Every missing or unparseable numeric field falls back to the
    /// `Default` value for that field instead of propagating NaN; fallbacks
    /// are logged at debug level.
    #[must_use]
    pub fn from_json(input: &serde_json::Value) -> Self {
        let defaults = Self::default();

        let axis = |key: &str, default_axis: &AxisConfig| -> AxisConfig {
            let node = &input[key];
            AxisConfig {
                min: lenient_f64(node, "min", default_axis.min),
                max: lenient_f64(node, "max", default_axis.max),
                increment: lenient_f64(node, "increment", default_axis.increment),
                label_every: lenient_f64(node, "label_every", f64::from(default_axis.label_every))
                    .max(0.0) as u32,
                label_on_zero: node["label_on_zero"]
                    .as_bool()
                    .unwrap_or(default_axis.label_on_zero),
                title: node["title"].as_str().map(str::to_owned),
            }
        };

        let paper_style = match input["paper_style"].as_str() {
            Some("dot") => PaperStyle::Dot,
            Some("polar") => PaperStyle::Polar,
            Some("grid") | None => PaperStyle::Grid,
            Some(other) => {
                debug!(value = other, "unknown paper style, falling back to grid");
                PaperStyle::Grid
            }
        };

        let x_labels = match input["x_label_type"].as_str() {
            Some("degrees") => XAxisLabels::Degrees,
            Some("radians") => XAxisLabels::Radians {
                multiplier: lenient_f64(input, "radian_multiplier", 1.0),
                grid_units_per_step: lenient_f64(input, "grid_units_per_radian_step", 1.0),
            },
            _ => XAxisLabels::Numbers,
        };

        Self {
            x_axis: axis("x_axis", &defaults.x_axis),
            y_axis: axis("y_axis", &defaults.y_axis),
            x_labels,
            square_size_px: lenient_f64(input, "square_size_px", defaults.square_size_px),
            paper_style,
            show_main_axes: input["show_main_axes"]
                .as_bool()
                .unwrap_or(defaults.show_main_axes),
            show_axis_arrows: input["show_axis_arrows"]
                .as_bool()
                .unwrap_or(defaults.show_axis_arrows),
            grid_color: defaults.grid_color,
            major_color: defaults.major_color,
            font_size_px: lenient_f64(input, "font_size_px", defaults.font_size_px),
            polar: PolarConfig {
                circle_count: lenient_f64(
                    &input["polar"],
                    "circle_count",
                    f64::from(defaults.polar.circle_count),
                )
                .max(0.0) as u32,
                radial_count: lenient_f64(
                    &input["polar"],
                    "radial_count",
                    f64::from(defaults.polar.radial_count),
                )
                .max(0.0) as u32,
                sweep_degrees: lenient_f64(
                    &input["polar"],
                    "sweep_degrees",
                    defaults.polar.sweep_degrees,
                ),
            },
        }
    }
}

/// Reads `node[key]` as a finite number, accepting numeric strings from form
/// controls, and substitutes `default` otherwise.
fn lenient_f64(node: &serde_json::Value, key: &str, default: f64) -> f64 {
    let raw = &node[key];
    let parsed = raw
        .as_f64()
        .or_else(|| raw.as_str().and_then(|text| text.trim().parse::<f64>().ok()));

    match parsed {
        Some(value) if value.is_finite() => value,
        Some(_) | None if raw.is_null() => default,
        Some(_) | None => {
            debug!(field = key, "unparseable numeric field, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GridConfig, PaperStyle};

    #[test]
    fn default_config_validates() {
        GridConfig::default().validate().expect("default is valid");
    }

    #[test]
    fn zero_square_size_is_rejected() {
        let config = GridConfig {
            square_size_px: 0.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_json_accepts_numeric_strings() {
        let input = serde_json::json!({
            "square_size_px": "32",
            "x_axis": { "min": "-4", "max": "4", "increment": "0.5" },
            "paper_style": "dot",
        });
        let config = GridConfig::from_json(&input);
        assert_eq!(config.square_size_px, 32.0);
        assert_eq!(config.x_axis.increment, 0.5);
        assert_eq!(config.paper_style, PaperStyle::Dot);
    }

    #[test]
    fn from_json_substitutes_defaults_for_garbage() {
        let input = serde_json::json!({
            "square_size_px": "not a number",
            "x_axis": { "min": {}, "max": null },
        });
        let config = GridConfig::from_json(&input);
        let defaults = GridConfig::default();
        assert_eq!(config.square_size_px, defaults.square_size_px);
        assert_eq!(config.x_axis.min, defaults.x_axis.min);
        assert_eq!(config.x_axis.max, defaults.x_axis.max);
    }
}
