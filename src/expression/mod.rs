//! Typed expression language: compilation from JSON and evaluation against features.
//!
//! A raw expression such as `["index-of", "b", ["get", "name"]]` is compiled by a
//! [`ParsingContext`] into a tree of [`Expression`] nodes, each carrying a static
//! [`Type`]. Compilation never stops at the first problem: every failing branch
//! records a [`ParsingError`] and the whole pass returns them together.
//!
//! Compiled trees are immutable and `Send + Sync`; evaluation takes an
//! [`EvaluationContext`] and returns a [`Value`] or a [`RuntimeError`].

pub(crate) mod collator;
pub(crate) mod definitions;
pub(crate) mod error;
pub(crate) mod evaluation_context;
pub(crate) mod parsing_context;
pub(crate) mod style_expression;
pub(crate) mod types;

use std::fmt;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::types::Type;
use crate::values::Value;

/// What a node reads from outside its own subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reads {
    /// Reads the current zoom.
    pub zoom: bool,
    /// Reads feature data.
    pub feature: bool,
    /// Reads the heatmap kernel density.
    pub heatmap_density: bool,
}

impl Reads {
    /// Reads nothing.
    pub const NONE: Self = Self {
        zoom: false,
        feature: false,
        heatmap_density: false,
    };

    /// Union of two read sets.
    pub fn union(self, other: Self) -> Self {
        Self {
            zoom: self.zoom || other.zoom,
            feature: self.feature || other.feature,
            heatmap_density: self.heatmap_density || other.heatmap_density,
        }
    }
}

/// A compiled, typed node.
pub trait Expression: Send + Sync + fmt::Debug {
    /// Static type, fixed at construction.
    fn ty(&self) -> &Type;

    /// Evaluate against `ctx`.
    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError>;

    /// Visit direct children.
    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression));

    /// Whether the output is defined for every input.
    fn output_defined(&self) -> bool;

    /// External inputs this node itself reads (children excluded).
    fn reads(&self) -> Reads {
        Reads::NONE
    }

    /// The constant value, for literal nodes.
    fn literal_value(&self) -> Option<&Value> {
        None
    }
}

/// Union of [`Expression::reads`] over the whole subtree.
pub fn subtree_reads(expr: &dyn Expression) -> Reads {
    let mut acc = expr.reads();
    expr.each_child(&mut |child: &dyn Expression| {
        acc = acc.union(subtree_reads(child));
    });
    acc
}

/// Whether the subtree reads the current zoom.
pub fn is_zoom_dependent(expr: &dyn Expression) -> bool {
    subtree_reads(expr).zoom
}

/// Whether the subtree reads feature data.
pub fn is_feature_dependent(expr: &dyn Expression) -> bool {
    subtree_reads(expr).feature
}

/// Whether the subtree can be evaluated once at compile time.
pub(crate) fn is_constant(expr: &dyn Expression) -> bool {
    subtree_reads(expr) == Reads::NONE
}
