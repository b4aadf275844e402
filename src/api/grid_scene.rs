//! Paper background construction: grid lines, dot lattices, polar rings,
//! main axes with optional arrowheads, tick numerals and axis titles.

use std::f64::consts::FRAC_PI_2;

use crate::core::{CoordinateTransform, GridConfig, PaperStyle, XAxisLabels, arrow_polygon};
use crate::layout::{TICK_LABEL_PADDING_PX, labeled_ticks, measure_or_zero};
use crate::render::{
    CirclePrimitive, LinePrimitive, PolygonPrimitive, Scene, TextHAlign, TextPrimitive,
};
use crate::text::TextMeasurer;

const GRID_LINE_WIDTH: f64 = 1.0;
const AXIS_LINE_WIDTH: f64 = 2.0;
const DOT_RADIUS: f64 = 1.3;
const ARROW_SIZE: f64 = 9.0;
const AXIS_ARROW_OVERHANG: f64 = 10.0;

pub(super) fn build_cartesian_paper(
    scene: &mut Scene,
    config: &GridConfig,
    transform: &CoordinateTransform,
    measurer: &dyn TextMeasurer,
) {
    let rect = transform.rect();
    let x_axis = transform.x_axis();
    let y_axis = transform.y_axis();
    let square = config.square_size_px;
    let font = config.font_size_px;

    match config.paper_style {
        PaperStyle::Grid => {
            for index in 0..=x_axis.cell_count() {
                let x = rect.x + index as f64 * square;
                scene.push(LinePrimitive::new(
                    x,
                    rect.y,
                    x,
                    rect.bottom(),
                    GRID_LINE_WIDTH,
                    config.grid_color,
                ));
            }
            for index in 0..=y_axis.cell_count() {
                let y = rect.y + index as f64 * square;
                scene.push(LinePrimitive::new(
                    rect.x,
                    y,
                    rect.right(),
                    y,
                    GRID_LINE_WIDTH,
                    config.grid_color,
                ));
            }
        }
        PaperStyle::Dot => {
            for xi in 0..=x_axis.cell_count() {
                for yi in 0..=y_axis.cell_count() {
                    scene.push(CirclePrimitive::filled(
                        rect.x + xi as f64 * square,
                        rect.y + yi as f64 * square,
                        DOT_RADIUS,
                        config.grid_color,
                    ));
                }
            }
        }
        PaperStyle::Polar => {
            debug_assert!(false, "polar paper goes through build_polar_paper");
            return;
        }
    }

    let x_axis_visible = x_axis.min <= 0.0 && x_axis.max >= 0.0;
    let y_axis_visible = y_axis.min <= 0.0 && y_axis.max >= 0.0;

    if config.show_main_axes {
        if x_axis_visible {
            let x0 = transform.to_device(0.0, y_axis.min).0;
            scene.push(LinePrimitive::new(
                x0,
                rect.y,
                x0,
                rect.bottom(),
                AXIS_LINE_WIDTH,
                config.major_color,
            ));
            if config.show_axis_arrows {
                scene.push(PolygonPrimitive::new(
                    arrow_polygon(x0, rect.y - AXIS_ARROW_OVERHANG, -FRAC_PI_2, ARROW_SIZE),
                    config.major_color,
                ));
            }
        }
        if y_axis_visible {
            let y0 = transform.to_device(x_axis.min, 0.0).1;
            scene.push(LinePrimitive::new(
                rect.x,
                y0,
                rect.right(),
                y0,
                AXIS_LINE_WIDTH,
                config.major_color,
            ));
            if config.show_axis_arrows {
                scene.push(PolygonPrimitive::new(
                    arrow_polygon(rect.right() + AXIS_ARROW_OVERHANG, y0, 0.0, ARROW_SIZE),
                    config.major_color,
                ));
            }
        }
    }

    for value in labeled_ticks(x_axis, config.x_axis.label_every, config.x_axis.label_on_zero) {
        let text = config.x_labels.format_tick(value);
        let extent = measure_or_zero(measurer, &text, font);
        let x_dev = transform.to_device(value, y_axis.min).0;
        scene.push(TextPrimitive::new(
            text,
            x_dev,
            rect.bottom() + TICK_LABEL_PADDING_PX + extent.ascent,
            font,
            config.major_color,
            TextHAlign::Center,
        ));
    }

    for value in labeled_ticks(y_axis, config.y_axis.label_every, config.y_axis.label_on_zero) {
        let text = XAxisLabels::Numbers.format_tick(value);
        let extent = measure_or_zero(measurer, &text, font);
        let y_dev = transform.to_device(x_axis.min, value).1;
        scene.push(TextPrimitive::new(
            text,
            rect.x - TICK_LABEL_PADDING_PX,
            y_dev + (extent.ascent - extent.descent) * 0.5,
            font,
            config.major_color,
            TextHAlign::Right,
        ));
    }

    if let Some(title) = &config.x_axis.title {
        let extent = measure_or_zero(measurer, title, font);
        scene.push(TextPrimitive::new(
            title.clone(),
            rect.x + rect.width * 0.5,
            f64::from(scene.viewport.height) - extent.descent - 2.0,
            font,
            config.major_color,
            TextHAlign::Center,
        ));
    }
    if let Some(title) = &config.y_axis.title {
        let extent = measure_or_zero(measurer, title, font);
        scene.push(
            TextPrimitive::new(
                title.clone(),
                2.0 + extent.ascent,
                rect.y + rect.height * 0.5,
                font,
                config.major_color,
                TextHAlign::Center,
            )
            .with_rotation(90.0),
        );
    }
}

pub(super) fn build_polar_paper(scene: &mut Scene, config: &GridConfig, center: (f64, f64)) {
    let (cx, cy) = center;
    let square = config.square_size_px;
    let polar = config.polar;
    let radius = f64::from(polar.circle_count) * square;

    for ring in 1..=polar.circle_count {
        scene.push(CirclePrimitive::outlined(
            cx,
            cy,
            f64::from(ring) * square,
            config.grid_color,
        ));
    }

    let full_sweep = polar.sweep_degrees >= 360.0;
    let spoke_count = if full_sweep {
        polar.radial_count
    } else {
        polar.radial_count + 1
    };
    let step_degrees = polar.sweep_degrees / f64::from(polar.radial_count);
    for spoke in 0..spoke_count {
        let angle = (f64::from(spoke) * step_degrees).to_radians();
        scene.push(LinePrimitive::new(
            cx,
            cy,
            cx + radius * angle.cos(),
            cy - radius * angle.sin(),
            GRID_LINE_WIDTH,
            config.grid_color,
        ));
    }

    if config.show_main_axes {
        scene.push(LinePrimitive::new(
            cx - radius,
            cy,
            cx + radius,
            cy,
            AXIS_LINE_WIDTH,
            config.major_color,
        ));
        scene.push(LinePrimitive::new(
            cx,
            cy - radius,
            cx,
            cy + radius,
            AXIS_LINE_WIDTH,
            config.major_color,
        ));
    }
}
