use gridplot::core::{AxisConfig, CoordinateTransform, GridConfig, PaperStyle, PlotRect, XAxisLabels};
use proptest::prelude::*;

fn config_with_ranges(x: (f64, f64), y: (f64, f64), increment: f64, square: f64) -> GridConfig {
    GridConfig {
        x_axis: AxisConfig {
            min: x.0,
            max: x.1,
            increment,
            ..AxisConfig::default()
        },
        y_axis: AxisConfig {
            min: y.0,
            max: y.1,
            increment,
            ..AxisConfig::default()
        },
        square_size_px: square,
        ..GridConfig::default()
    }
}

#[test]
fn corners_map_to_plot_rectangle_corners() {
    let config = config_with_ranges((0.0, 10.0), (0.0, 10.0), 1.0, 40.0);
    let rect = PlotRect::new(60.0, 20.0, 400.0, 400.0);
    let transform = CoordinateTransform::new(&config, rect).expect("transform");

    assert_eq!(transform.to_device(0.0, 0.0), (60.0, 420.0));
    assert_eq!(transform.to_device(10.0, 10.0), (460.0, 20.0));
}

#[test]
fn round_trip_recovers_point() {
    let config = config_with_ranges((-5.0, 5.0), (-3.0, 7.0), 0.5, 24.0);
    let rect = PlotRect::new(30.0, 30.0, 480.0, 480.0);
    let transform = CoordinateTransform::new(&config, rect).expect("transform");

    let (xd, yd) = transform.to_device(1.25, -2.75);
    let (x, y) = transform.to_math(xd, yd);
    assert!((x - 1.25).abs() <= 1e-9);
    assert!((y + 2.75).abs() <= 1e-9);
}

#[test]
fn radian_axis_derives_cell_value_from_multiplier() {
    let mut config = config_with_ranges((-2.0, 2.0), (-2.0, 2.0), 1.0, 30.0);
    config.x_labels = XAxisLabels::Radians {
        multiplier: 0.5,
        grid_units_per_step: 2.0,
    };

    let (width, _) = CoordinateTransform::plot_size(&config).expect("plot size");
    // Effective x range is -π..π with cell value π/4: eight 30px cells.
    assert!((width - 240.0).abs() <= 1e-9);
}

#[test]
fn published_snapshot_carries_mapping_fields() {
    let config = config_with_ranges((0.0, 8.0), (-4.0, 4.0), 1.0, 25.0);
    let rect = PlotRect::new(40.0, 40.0, 200.0, 200.0);
    let transform = CoordinateTransform::new(&config, rect).expect("transform");

    let published = transform.published();
    assert_eq!(published.x_min, 0.0);
    assert_eq!(published.x_max, 8.0);
    assert_eq!(published.y_min, -4.0);
    assert_eq!(published.plot_x, 40.0);
    assert_eq!(published.plot_width, 200.0);
    assert_eq!(published.square_size_px, 25.0);
    assert_eq!(published.x_value_per_minor_cell, 1.0);
    assert_eq!(published.y_increment, 1.0);
}

#[test]
fn polar_paper_has_no_transform() {
    let config = GridConfig {
        paper_style: PaperStyle::Polar,
        ..GridConfig::default()
    };
    let rect = PlotRect::new(0.0, 0.0, 100.0, 100.0);
    assert!(CoordinateTransform::new(&config, rect).is_err());
}

#[test]
fn inverted_range_is_rejected() {
    let config = config_with_ranges((5.0, -5.0), (0.0, 10.0), 1.0, 24.0);
    let rect = PlotRect::new(0.0, 0.0, 100.0, 100.0);
    assert!(CoordinateTransform::new(&config, rect).is_err());
}

proptest! {
    #[test]
    fn round_trip_property(x in -100.0_f64..100.0, y in -100.0_f64..100.0) {
        let config = config_with_ranges((-100.0, 100.0), (-100.0, 100.0), 2.0, 10.0);
        let rect = PlotRect::new(25.0, 25.0, 1000.0, 1000.0);
        let transform = CoordinateTransform::new(&config, rect).expect("transform");

        let (xd, yd) = transform.to_device(x, y);
        let (rx, ry) = transform.to_math(xd, yd);
        prop_assert!((rx - x).abs() <= 1e-7);
        prop_assert!((ry - y).abs() <= 1e-7);
    }
}
