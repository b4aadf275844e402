use gridplot::core::{AxisConfig, CompiledFunction, EquationSet, GridConfig, LabelMode, PaperStyle};
use gridplot::error::{GridError, GridResult};
use gridplot::layout::{MIN_MARGIN_PX, Margins, compute_margins};
use gridplot::text::{HeuristicTextMeasurer, TextExtent, TextMeasurer};

struct FailingMeasurer;

impl TextMeasurer for FailingMeasurer {
    fn measure(&self, _text: &str, _font_size_px: f64) -> GridResult<TextExtent> {
        Err(GridError::Measurement("no backend".to_owned()))
    }
}

fn margins_for(config: &GridConfig, equations: &EquationSet) -> Margins {
    compute_margins(config, equations, &HeuristicTextMeasurer)
}

#[test]
fn all_margins_respect_minimum() {
    let config = GridConfig {
        x_axis: AxisConfig {
            label_every: 0,
            ..AxisConfig::default()
        },
        y_axis: AxisConfig {
            label_every: 0,
            ..AxisConfig::default()
        },
        ..GridConfig::default()
    };
    let margins = margins_for(&config, &EquationSet::new());
    assert!(margins.left >= MIN_MARGIN_PX);
    assert!(margins.right >= MIN_MARGIN_PX);
    assert!(margins.top >= MIN_MARGIN_PX);
    assert!(margins.bottom >= MIN_MARGIN_PX);
}

#[test]
fn left_margin_grows_with_label_length() {
    let narrow = GridConfig {
        y_axis: AxisConfig {
            min: 0.0,
            max: 9.0,
            ..AxisConfig::default()
        },
        ..GridConfig::default()
    };
    let wide = GridConfig {
        y_axis: AxisConfig {
            min: 0.0,
            max: 900_000.0,
            increment: 100_000.0,
            ..AxisConfig::default()
        },
        ..GridConfig::default()
    };

    let empty = EquationSet::new();
    let narrow_margins = margins_for(&narrow, &empty);
    let wide_margins = margins_for(&wide, &empty);
    assert!(wide_margins.left > narrow_margins.left);
}

#[test]
fn widest_equation_label_reserves_right_margin() {
    let config = GridConfig::default();
    let empty = EquationSet::new();

    let mut labeled = EquationSet::new();
    let id = labeled.insert("", CompiledFunction::new(|x| x));
    labeled.get_mut(id).expect("exists").label_mode =
        LabelMode::Custom("a very long equation label".to_owned());

    let without = margins_for(&config, &empty);
    let with = margins_for(&config, &labeled);
    assert!(with.right > without.right);
}

#[test]
fn axis_arrows_reserve_top_and_right_space() {
    let plain = GridConfig::default();
    let arrows = GridConfig {
        show_axis_arrows: true,
        ..GridConfig::default()
    };

    let empty = EquationSet::new();
    let plain_margins = margins_for(&plain, &empty);
    let arrow_margins = margins_for(&arrows, &empty);
    assert!(arrow_margins.top > plain_margins.top);
    assert!(arrow_margins.right > plain_margins.right);
}

#[test]
fn axis_titles_widen_their_margins() {
    let untitled = GridConfig::default();
    let titled = GridConfig {
        x_axis: AxisConfig {
            title: Some("time".to_owned()),
            ..AxisConfig::default()
        },
        y_axis: AxisConfig {
            title: Some("value".to_owned()),
            ..AxisConfig::default()
        },
        ..GridConfig::default()
    };

    let empty = EquationSet::new();
    let base = margins_for(&untitled, &empty);
    let with_titles = margins_for(&titled, &empty);
    assert!(with_titles.left > base.left);
    assert!(with_titles.bottom > base.bottom);
}

#[test]
fn measurement_failure_degrades_to_minimums() {
    let config = GridConfig::default();
    let margins = compute_margins(&config, &EquationSet::new(), &FailingMeasurer);
    assert!(margins.left >= MIN_MARGIN_PX);
    assert!(margins.bottom >= MIN_MARGIN_PX);
}

#[test]
fn polar_paper_uses_minimal_margins() {
    let config = GridConfig {
        paper_style: PaperStyle::Polar,
        ..GridConfig::default()
    };
    let margins = margins_for(&config, &EquationSet::new());
    assert_eq!(margins, Margins::minimal());
}
