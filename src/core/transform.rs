use serde::{Deserialize, Serialize};

use crate::core::axis::{ResolvedAxis, XAxisLabels};
use crate::core::grid_config::{GridConfig, PaperStyle};
use crate::error::{GridError, GridResult};

/// Total device surface for one scene, plot area plus margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Device-space rectangle of the plotting area, inside the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// True when the point lies inside the rectangle, boundary excluded.
    #[must_use]
    pub fn strictly_contains(self, x: f64, y: f64) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }

    /// True when the point lies inside or on the boundary.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Read-only Cartesian mapping snapshot published to external overlays after
/// each successful redraw. Polar layouts publish no snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PublishedTransform {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub plot_x: f64,
    pub plot_y: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub square_size_px: f64,
    pub x_value_per_minor_cell: f64,
    pub y_increment: f64,
}

/// Pure mapping between mathematical (x, y) space and device space.
///
/// Device y grows downward, so the mathematical y axis is inverted here and
/// nowhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    x: ResolvedAxis,
    y: ResolvedAxis,
    rect: PlotRect,
    square_size_px: f64,
}

impl CoordinateTransform {
    pub fn new(config: &GridConfig, rect: PlotRect) -> GridResult<Self> {
        if config.paper_style == PaperStyle::Polar {
            return Err(GridError::InvalidConfig(
                "polar paper has no Cartesian transform".to_owned(),
            ));
        }
        if !rect.is_valid() {
            return Err(GridError::InvalidConfig(format!(
                "plot rectangle must have positive finite size (got {} x {})",
                rect.width, rect.height
            )));
        }
        if !config.square_size_px.is_finite() || config.square_size_px <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "square size must be finite and > 0 px (got {})",
                config.square_size_px
            )));
        }

        Ok(Self {
            x: config.x_labels.resolve(&config.x_axis, "x")?,
            y: XAxisLabels::Numbers.resolve(&config.y_axis, "y")?,
            rect,
            square_size_px: config.square_size_px,
        })
    }

    /// Plot size in device pixels implied by the grid itself: cells times
    /// square size. The engine derives the scene viewport from this.
    pub fn plot_size(config: &GridConfig) -> GridResult<(f64, f64)> {
        let x = config.x_labels.resolve(&config.x_axis, "x")?;
        let y = XAxisLabels::Numbers.resolve(&config.y_axis, "y")?;
        Ok((
            x.span() / x.cell_value * config.square_size_px,
            y.span() / y.cell_value * config.square_size_px,
        ))
    }

    #[must_use]
    pub fn rect(&self) -> PlotRect {
        self.rect
    }

    #[must_use]
    pub fn x_axis(&self) -> ResolvedAxis {
        self.x
    }

    #[must_use]
    pub fn y_axis(&self) -> ResolvedAxis {
        self.y
    }

    #[must_use]
    pub fn to_device(&self, x_math: f64, y_math: f64) -> (f64, f64) {
        let x_dev = self.rect.x + (x_math - self.x.min) / self.x.cell_value * self.square_size_px;
        let y_dev = self.rect.y + self.rect.height
            - (y_math - self.y.min) / self.y.increment * self.square_size_px;
        (x_dev, y_dev)
    }

    #[must_use]
    pub fn to_math(&self, x_dev: f64, y_dev: f64) -> (f64, f64) {
        let x_math = self.x.min + (x_dev - self.rect.x) / self.square_size_px * self.x.cell_value;
        let y_math = self.y.min
            + (self.rect.y + self.rect.height - y_dev) / self.square_size_px * self.y.increment;
        (x_math, y_math)
    }

    #[must_use]
    pub fn published(&self) -> PublishedTransform {
        PublishedTransform {
            x_min: self.x.min,
            x_max: self.x.max,
            y_min: self.y.min,
            y_max: self.y.max,
            plot_x: self.rect.x,
            plot_y: self.rect.y,
            plot_width: self.rect.width,
            plot_height: self.rect.height,
            square_size_px: self.square_size_px,
            x_value_per_minor_cell: self.x.cell_value,
            y_increment: self.y.increment,
        }
    }
}
