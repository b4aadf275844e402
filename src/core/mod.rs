mod axis;
mod equation;
mod grid_config;
mod markers;
mod sampler;
mod shading;
mod transform;

pub use axis::{AxisConfig, ResolvedAxis, XAxisLabels};
pub use equation::{
    Bound, CompiledFunction, Domain, Equation, EquationId, EquationSet, LabelMode, LabelOffset,
    Relation,
};
pub use grid_config::{GridConfig, PaperStyle, PolarConfig};
pub use markers::{EndpointMarker, arrow_polygon, endpoint_markers};
pub use sampler::{SamplePoint, Segment, sample_equation};
pub use shading::build_region;
pub use transform::{CoordinateTransform, PlotRect, PublishedTransform, Viewport};
