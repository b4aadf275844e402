use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Configuration for one axis in mathematical units.
///
/// `increment` is the value of one minor grid cell. `label_every` is the
/// stride, in minor cells, between numbered ticks; `0` disables numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
    pub label_every: u32,
    pub label_on_zero: bool,
    pub title: Option<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
            increment: 1.0,
            label_every: 1,
            label_on_zero: false,
            title: None,
        }
    }
}

impl AxisConfig {
    pub fn validate(&self, axis_name: &str) -> GridResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(GridError::InvalidConfig(format!(
                "{axis_name} axis range must be finite with min < max (got {} .. {})",
                self.min, self.max
            )));
        }
        if !self.increment.is_finite() || self.increment <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "{axis_name} axis increment must be finite and > 0 (got {})",
                self.increment
            )));
        }
        Ok(())
    }
}

/// Closed variant describing how x-axis values are interpreted and labeled.
///
/// The variant is resolved once per redraw into a `ResolvedAxis` instead of
/// being re-branched inside the transform, the sampler and the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum XAxisLabels {
    #[default]
    Numbers,
    Degrees,
    /// Axis expressed in multiples of `multiplier * π`, with
    /// `grid_units_per_step` minor cells spanning one such multiple.
    Radians {
        multiplier: f64,
        grid_units_per_step: f64,
    },
}

impl XAxisLabels {
    /// Derives the effective mathematical range and per-minor-cell value.
    pub fn resolve(self, axis: &AxisConfig, axis_name: &str) -> GridResult<ResolvedAxis> {
        axis.validate(axis_name)?;

        let resolved = match self {
            Self::Numbers | Self::Degrees => ResolvedAxis {
                min: axis.min,
                max: axis.max,
                increment: axis.increment,
                cell_value: axis.increment,
            },
            Self::Radians {
                multiplier,
                grid_units_per_step,
            } => {
                if !multiplier.is_finite() || multiplier <= 0.0 {
                    return Err(GridError::InvalidConfig(format!(
                        "radian multiplier must be finite and > 0 (got {multiplier})"
                    )));
                }
                if !grid_units_per_step.is_finite() || grid_units_per_step <= 0.0 {
                    return Err(GridError::InvalidConfig(format!(
                        "grid units per radian step must be finite and > 0 (got {grid_units_per_step})"
                    )));
                }
                let step = multiplier * PI;
                ResolvedAxis {
                    min: axis.min * step,
                    max: axis.max * step,
                    increment: axis.increment * step,
                    cell_value: axis.increment * step / grid_units_per_step,
                }
            }
        };

        resolved.validate(axis_name)?;
        Ok(resolved)
    }

    /// Converts a sampled axis value into the evaluation space of the compiled
    /// function, which always operates in radians for angular axes.
    #[must_use]
    pub fn to_eval_space(self, x: f64) -> f64 {
        match self {
            Self::Numbers | Self::Radians { .. } => x,
            Self::Degrees => x.to_radians(),
        }
    }

    #[must_use]
    pub fn format_tick(self, value: f64) -> String {
        match self {
            Self::Numbers => format_number(value),
            Self::Degrees => format!("{}°", format_number(value)),
            Self::Radians { .. } => format_radian(value),
        }
    }
}

/// Effective axis parameters after the label-type derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAxis {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
    /// Mathematical value spanned by one minor grid cell.
    pub cell_value: f64,
}

impl ResolvedAxis {
    pub fn validate(self, axis_name: &str) -> GridResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(GridError::InvalidConfig(format!(
                "{axis_name} axis derived range must be finite with min < max"
            )));
        }
        if !self.cell_value.is_finite() || self.cell_value <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "{axis_name} axis derived cell value must be finite and > 0"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Number of minor cells across the axis, rounded to the nearest whole cell.
    #[must_use]
    pub fn cell_count(self) -> usize {
        (self.span() / self.cell_value).round().max(1.0) as usize
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value == value.trunc() && value.abs() < 1e12 {
        return format!("{}", value as i64);
    }

    let mut text = format!("{value:.6}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Formats a radian value as an exact π fraction when one exists, otherwise
/// as a decimal multiple of π.
pub(crate) fn format_radian(value: f64) -> String {
    let ratio = value / PI;
    if ratio.abs() < 1e-9 {
        return "0".to_owned();
    }

    for denominator in 1_u32..=12 {
        let numerator = ratio * f64::from(denominator);
        if (numerator - numerator.round()).abs() < 1e-9 {
            let numerator = numerator.round() as i64;
            return match (numerator, denominator) {
                (1, 1) => "π".to_owned(),
                (-1, 1) => "-π".to_owned(),
                (n, 1) => format!("{n}π"),
                (1, d) => format!("π/{d}"),
                (-1, d) => format!("-π/{d}"),
                (n, d) => format!("{n}π/{d}"),
            };
        }
    }

    format!("{}π", format_number(ratio))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::{AxisConfig, XAxisLabels, format_number, format_radian};

    #[test]
    fn number_formatting_trims_trailing_zeros() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(0.125), "0.125");
    }

    #[test]
    fn radian_formatting_uses_pi_fractions() {
        assert_eq!(format_radian(PI), "π");
        assert_eq!(format_radian(-PI), "-π");
        assert_eq!(format_radian(PI / 2.0), "π/2");
        assert_eq!(format_radian(3.0 * PI / 4.0), "3π/4");
        assert_eq!(format_radian(2.0 * PI), "2π");
        assert_eq!(format_radian(0.0), "0");
    }

    #[test]
    fn radian_axis_derives_effective_range() {
        let axis = AxisConfig {
            min: -2.0,
            max: 2.0,
            increment: 1.0,
            ..AxisConfig::default()
        };
        let labels = XAxisLabels::Radians {
            multiplier: 0.5,
            grid_units_per_step: 2.0,
        };

        let resolved = labels.resolve(&axis, "x").expect("resolve");
        assert!((resolved.min + PI).abs() < 1e-12);
        assert!((resolved.max - PI).abs() < 1e-12);
        assert!((resolved.cell_value - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn degrees_convert_to_radians_for_evaluation() {
        let labels = XAxisLabels::Degrees;
        assert!((labels.to_eval_space(180.0) - PI).abs() < 1e-12);
    }

    #[test]
    fn zero_increment_is_rejected() {
        let axis = AxisConfig {
            increment: 0.0,
            ..AxisConfig::default()
        };
        assert!(XAxisLabels::Numbers.resolve(&axis, "x").is_err());
    }
}
