use gridplot::core::{GridConfig, PaperStyle, XAxisLabels};

#[test]
fn form_input_with_numeric_strings_parses() {
    let input = serde_json::json!({
        "x_axis": { "min": "-6", "max": "6", "increment": "0.5", "label_every": 2 },
        "y_axis": { "min": -3, "max": 3, "increment": 1, "label_on_zero": true },
        "square_size_px": "30",
        "show_axis_arrows": true,
    });

    let config = GridConfig::from_json(&input);
    assert_eq!(config.x_axis.min, -6.0);
    assert_eq!(config.x_axis.increment, 0.5);
    assert_eq!(config.x_axis.label_every, 2);
    assert!(config.y_axis.label_on_zero);
    assert_eq!(config.square_size_px, 30.0);
    assert!(config.show_axis_arrows);
    config.validate().expect("parsed config is valid");
}

#[test]
fn garbage_fields_fall_back_to_defaults() {
    let input = serde_json::json!({
        "x_axis": { "min": [], "max": "not a number" },
        "square_size_px": { "nested": true },
        "paper_style": "hexagonal",
        "font_size_px": "NaN",
    });

    let config = GridConfig::from_json(&input);
    let defaults = GridConfig::default();
    assert_eq!(config.x_axis.min, defaults.x_axis.min);
    assert_eq!(config.x_axis.max, defaults.x_axis.max);
    assert_eq!(config.square_size_px, defaults.square_size_px);
    assert_eq!(config.font_size_px, defaults.font_size_px);
    assert_eq!(config.paper_style, PaperStyle::Grid);
}

#[test]
fn empty_input_is_the_default_config() {
    let config = GridConfig::from_json(&serde_json::json!({}));
    assert_eq!(config, GridConfig::default());
}

#[test]
fn radian_label_settings_parse_from_flat_keys() {
    let input = serde_json::json!({
        "x_label_type": "radians",
        "radian_multiplier": "0.5",
        "grid_units_per_radian_step": 2,
    });

    let config = GridConfig::from_json(&input);
    assert_eq!(
        config.x_labels,
        XAxisLabels::Radians {
            multiplier: 0.5,
            grid_units_per_step: 2.0,
        }
    );
}

#[test]
fn degree_label_type_parses() {
    let input = serde_json::json!({ "x_label_type": "degrees" });
    let config = GridConfig::from_json(&input);
    assert_eq!(config.x_labels, XAxisLabels::Degrees);
}

#[test]
fn config_serde_round_trip() {
    let config = GridConfig {
        paper_style: PaperStyle::Dot,
        x_labels: XAxisLabels::Degrees,
        square_size_px: 18.0,
        ..GridConfig::default()
    };

    let value = serde_json::to_value(&config).expect("serialize");
    let restored: GridConfig = serde_json::from_value(value).expect("deserialize");
    assert_eq!(restored, config);
}

#[test]
fn polar_settings_parse_from_nested_object() {
    let input = serde_json::json!({
        "paper_style": "polar",
        "polar": { "circle_count": "6", "radial_count": 8, "sweep_degrees": 180 },
    });

    let config = GridConfig::from_json(&input);
    assert_eq!(config.paper_style, PaperStyle::Polar);
    assert_eq!(config.polar.circle_count, 6);
    assert_eq!(config.polar.radial_count, 8);
    assert_eq!(config.polar.sweep_degrees, 180.0);
}
