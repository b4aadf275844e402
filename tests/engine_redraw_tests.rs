use gridplot::api::{GridEngine, RedrawInput};
use gridplot::core::{
    AxisConfig, CompiledFunction, EquationSet, GridConfig, PaperStyle, PolarConfig,
};
use gridplot::error::GridError;
use gridplot::render::{NullRenderer, Primitive, Renderer};

fn simple_config() -> GridConfig {
    GridConfig {
        x_axis: AxisConfig {
            min: 0.0,
            max: 10.0,
            increment: 1.0,
            ..AxisConfig::default()
        },
        y_axis: AxisConfig {
            min: 0.0,
            max: 10.0,
            increment: 1.0,
            ..AxisConfig::default()
        },
        square_size_px: 24.0,
        ..GridConfig::default()
    }
}

#[test]
fn invalid_increment_aborts_before_drawing() {
    let config = GridConfig {
        x_axis: AxisConfig {
            increment: 0.0,
            ..AxisConfig::default()
        },
        ..GridConfig::default()
    };
    let equations = EquationSet::new();
    let mut engine = GridEngine::with_heuristic_text();

    let result = engine.redraw(RedrawInput {
        config: &config,
        equations: &equations,
    });
    assert!(matches!(result, Err(GridError::InvalidConfig(_))));
    // A failed redraw never advances the scene epoch.
    assert_eq!(engine.epoch(), 0);
}

#[test]
fn cartesian_redraw_publishes_transform() {
    let config = simple_config();
    let equations = EquationSet::new();
    let mut engine = GridEngine::with_heuristic_text();

    let output = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw");

    let published = output.transform.expect("cartesian publishes a transform");
    assert_eq!(published.plot_width, 240.0);
    assert_eq!(published.plot_height, 240.0);
    assert_eq!(published.square_size_px, 24.0);
    assert!(output.scene.count_of(|p| matches!(p, Primitive::Line(_))) >= 22);
}

#[test]
fn polar_redraw_publishes_no_transform() {
    let config = GridConfig {
        paper_style: PaperStyle::Polar,
        polar: PolarConfig {
            circle_count: 5,
            radial_count: 8,
            sweep_degrees: 360.0,
        },
        ..GridConfig::default()
    };
    let equations = EquationSet::new();
    let mut engine = GridEngine::with_heuristic_text();

    let output = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw");

    assert!(output.transform.is_none());
    assert_eq!(
        output.scene.count_of(|p| matches!(p, Primitive::Circle(_))),
        5
    );
}

#[test]
fn dot_paper_emits_lattice_points() {
    let config = GridConfig {
        paper_style: PaperStyle::Dot,
        ..simple_config()
    };
    let equations = EquationSet::new();
    let mut engine = GridEngine::with_heuristic_text();

    let output = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw");

    assert_eq!(
        output.scene.count_of(|p| matches!(p, Primitive::Circle(_))),
        11 * 11
    );
}

#[test]
fn scene_passes_renderer_validation() {
    let config = simple_config();
    let mut equations = EquationSet::new();
    equations.insert("x", CompiledFunction::new(|x| x));
    let mut engine = GridEngine::with_heuristic_text();

    let output = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw");

    let mut renderer = NullRenderer::default();
    renderer.render(&output.scene).expect("valid scene");
    assert!(renderer.last_polyline_count >= 1);
    assert!(renderer.last_text_count >= 1);
}

#[test]
fn epoch_increases_per_successful_redraw() {
    let config = simple_config();
    let equations = EquationSet::new();
    let mut engine = GridEngine::with_heuristic_text();

    let first = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw");
    let second = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw");
    assert!(second.epoch > first.epoch);
}

#[test]
fn bad_equation_never_prevents_grid_rendering() {
    let config = simple_config();
    let mut equations = EquationSet::new();
    equations.insert("nan", CompiledFunction::new(|_| f64::NAN));
    let mut engine = GridEngine::with_heuristic_text();

    let output = engine
        .redraw(RedrawInput {
            config: &config,
            equations: &equations,
        })
        .expect("redraw survives a fully invalid equation");
    assert!(output.scene.count_of(|p| matches!(p, Primitive::Line(_))) > 0);
    assert_eq!(
        output.scene.count_of(|p| matches!(p, Primitive::Polyline(_))),
        0
    );
}
