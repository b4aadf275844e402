use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::{Color, StrokeStyle};

/// Identity of one equation in the ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquationId(u64);

impl EquationId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque compiled scalar function supplied by the external evaluator.
///
/// The evaluator may yield non-finite values for invalid input; `eval` folds
/// those into `None` so sampling code has a single invalid-point path. A
/// throwing evaluator is adapted by the host into a NaN-returning closure.
#[derive(Clone)]
pub struct CompiledFunction(Rc<dyn Fn(f64) -> f64>);

impl CompiledFunction {
    pub fn new(function: impl Fn(f64) -> f64 + 'static) -> Self {
        Self(Rc::new(function))
    }

    #[must_use]
    pub fn eval(&self, x: f64) -> Option<f64> {
        let y = (self.0)(x);
        y.is_finite().then_some(y)
    }
}

impl fmt::Debug for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompiledFunction")
    }
}

/// One side of a domain restriction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Bound {
    #[default]
    Open,
    At(f64),
}

impl Bound {
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Open => None,
            Self::At(value) => Some(value),
        }
    }
}

/// Restriction of an equation to a sub-range of x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Domain {
    pub start: Bound,
    pub end: Bound,
}

impl Domain {
    pub const OPEN: Self = Self {
        start: Bound::Open,
        end: Bound::Open,
    };

    #[must_use]
    pub const fn from_start(start: f64) -> Self {
        Self {
            start: Bound::At(start),
            end: Bound::Open,
        }
    }

    #[must_use]
    pub const fn closed(start: f64, end: f64) -> Self {
        Self {
            start: Bound::At(start),
            end: Bound::At(end),
        }
    }

    /// Membership test with a small tolerance at closed boundaries so that a
    /// sample landing on the bound within float error is not rejected.
    #[must_use]
    pub fn contains(self, x: f64, epsilon: f64) -> bool {
        if let Bound::At(start) = self.start
            && x < start - epsilon
        {
            return false;
        }
        if let Bound::At(end) = self.end
            && x > end + epsilon
        {
            return false;
        }
        true
    }
}

/// Comparison operator governing line-only versus shaded-region rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Relation {
    #[default]
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    #[must_use]
    pub const fn is_inequality(self) -> bool {
        !matches!(self, Self::Eq)
    }
}

/// Where an equation's text label comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelMode {
    #[default]
    FromExpression,
    Custom(String),
    Hidden,
}

/// Persisted device-space displacement of a dragged label, relative to the
/// equation's stable reference point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelOffset {
    pub dx: f64,
    pub dy: f64,
}

/// One user-supplied curve or inequality.
///
/// Everything except `id` is freely mutated by the host editing UI between
/// redraws; the core only reads equations and writes `label_offset` back
/// after a completed drag gesture.
#[derive(Debug, Clone)]
pub struct Equation {
    id: EquationId,
    pub expression: String,
    pub function: CompiledFunction,
    pub domain: Domain,
    pub relation: Relation,
    pub color: Color,
    pub line_style: StrokeStyle,
    pub label_mode: LabelMode,
    pub show_endpoint_markers: bool,
    pub label_offset: Option<LabelOffset>,
}

impl Equation {
    #[must_use]
    pub const fn id(&self) -> EquationId {
        self.id
    }

    /// Effective label text, `None` when the label is hidden or empty.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        let text = match &self.label_mode {
            LabelMode::FromExpression => self.expression.as_str(),
            LabelMode::Custom(text) => text.as_str(),
            LabelMode::Hidden => return None,
        };
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Ordered equation collection with monotonic id assignment.
///
/// This is the only cross-cutting mutable state in the system. It is owned by
/// the host, read in full at the start of each redraw, and mutated by the
/// editing UI and the drag controller's offset write-back, all on one thread.
#[derive(Debug, Default, Clone)]
pub struct EquationSet {
    entries: IndexMap<EquationId, Equation>,
    next_id: u64,
}

impl EquationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        expression: impl Into<String>,
        function: CompiledFunction,
    ) -> EquationId {
        let id = EquationId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entries.insert(
            id,
            Equation {
                id,
                expression: expression.into(),
                function,
                domain: Domain::OPEN,
                relation: Relation::Eq,
                color: Color::rgb(0.13, 0.31, 0.70),
                line_style: StrokeStyle::Solid,
                label_mode: LabelMode::FromExpression,
                show_endpoint_markers: false,
                label_offset: None,
            },
        );
        id
    }

    pub fn remove(&mut self, id: EquationId) -> Option<Equation> {
        self.entries.shift_remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: EquationId) -> Option<&Equation> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: EquationId) -> Option<&mut Equation> {
        self.entries.get_mut(&id)
    }

    pub fn set_label_offset(&mut self, id: EquationId, offset: Option<LabelOffset>) -> bool {
        match self.entries.get_mut(&id) {
            Some(equation) => {
                equation.label_offset = offset;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Equation> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, CompiledFunction, Domain, EquationSet, LabelMode};

    #[test]
    fn ids_are_monotonic_across_removal() {
        let mut set = EquationSet::new();
        let first = set.insert("x", CompiledFunction::new(|x| x));
        let second = set.insert("x^2", CompiledFunction::new(|x| x * x));
        set.remove(first);
        let third = set.insert("x^3", CompiledFunction::new(|x| x * x * x));

        assert!(second.raw() > first.raw());
        assert!(third.raw() > second.raw());
    }

    #[test]
    fn eval_folds_non_finite_into_none() {
        let function = CompiledFunction::new(|x| 1.0 / x);
        assert!(function.eval(0.0).is_none());
        assert_eq!(function.eval(2.0), Some(0.5));
    }

    #[test]
    fn domain_boundary_tolerance() {
        let domain = Domain::from_start(2.0);
        assert!(domain.contains(2.0, 1e-9));
        assert!(domain.contains(2.0 - 1e-12, 1e-9));
        assert!(!domain.contains(1.9, 1e-9));
        assert_eq!(domain.start, Bound::At(2.0));
    }

    #[test]
    fn hidden_and_blank_labels_yield_no_text() {
        let mut set = EquationSet::new();
        let id = set.insert("  ", CompiledFunction::new(|x| x));
        assert!(set.get(id).expect("exists").label_text().is_none());

        set.get_mut(id).expect("exists").label_mode = LabelMode::Custom("f".to_owned());
        assert_eq!(set.get(id).expect("exists").label_text(), Some("f"));

        set.get_mut(id).expect("exists").label_mode = LabelMode::Hidden;
        assert!(set.get(id).expect("exists").label_text().is_none());
    }
}
