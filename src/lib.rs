//! Typed style expressions and legacy stop functions for declarative map styling.
//!
//! The crate has three cooperating parts:
//!
//! - **Expressions**: [`create_expression`] compiles a JSON expression such as
//!   `["index-of", "b", ["get", "name"]]` into a typed, immutable [`StyleExpression`],
//!   collecting every [`ParsingError`] in one pass.
//! - **Legacy functions**: [`create_function`] compiles a stop-based
//!   [`FunctionParameters`] definition into a [`CompiledFunction`] evaluated against
//!   zoom and feature properties.
//! - **Collation**: [`Collator`] compares strings by locale and sensitivity for the
//!   comparison operators.
//!
//! Compiled artifacts hold no per-call state and may be evaluated from many threads at
//! once; see [`StyleExpression::evaluate_features`] and
//! [`CompiledFunction::evaluate_features`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod expression;
pub(crate) mod function;
pub(crate) mod interpolate;
pub(crate) mod values;

pub use crate::foundation::error::{StyleError, StyleResult};

pub use crate::expression::collator::{Collator, IcuEngine, LocaleEngine, Sensitivity};
pub use crate::expression::definitions::{ParseFn, Registry};
pub use crate::expression::error::{ParsingError, RuntimeError};
pub use crate::expression::evaluation_context::{
    EvaluationContext, Feature, GeometryType, GlobalProperties,
};
pub use crate::expression::parsing_context::{Binding, ParsingContext, Scope, parse_expression};
pub use crate::expression::style_expression::{
    StyleExpression, create_expression, create_expression_with,
};
pub use crate::expression::types::{
    NativeType, Type, check_subtype, is_valid_native_type, is_valid_type, type_to_string,
};
pub use crate::expression::{
    Expression, Reads, is_feature_dependent, is_zoom_dependent, subtree_reads,
};

pub use crate::function::{
    CompiledFunction, ExpressionSpec, FunctionError, FunctionKind, FunctionParameters,
    FunctionType, PropertySpec, Stop, create_function,
};

pub use crate::interpolate::{
    ColorSpace, InterpolationType, Lerp, exponential_interpolation,
    find_stop_less_than_or_equal_to, interpolate_value, interpolation_factor,
};

pub use crate::values::{
    Color, ColorArray, Formatted, FormattedSection, NumberArray, Padding, ResolvedImage, Value,
};
