use rayon::prelude::*;
use serde_json::Value as Json;

use crate::expression::definitions::Registry;
use crate::expression::error::{ParsingError, RuntimeError};
use crate::expression::evaluation_context::{EvaluationContext, Feature, GlobalProperties};
use crate::expression::parsing_context::parse_expression;
use crate::expression::types::Type;
use crate::expression::{Expression, is_feature_dependent, is_zoom_dependent};
use crate::function::PropertySpec;
use crate::values::Value;

/// A compiled expression bound to the property it styles.
#[derive(Debug)]
pub struct StyleExpression {
    expression: Box<dyn Expression>,
    spec: Option<PropertySpec>,
    default: Value,
}

impl StyleExpression {
    fn new(expression: Box<dyn Expression>, spec: Option<&PropertySpec>) -> Self {
        let default = spec
            .and_then(|s| s.default.as_ref().and_then(|raw| s.parse_value(raw)))
            .unwrap_or(Value::Null);
        Self {
            expression,
            spec: spec.cloned(),
            default,
        }
    }

    /// Root node of the compiled tree.
    pub fn expression(&self) -> &dyn Expression {
        self.expression.as_ref()
    }

    /// Static result type.
    pub fn ty(&self) -> &Type {
        self.expression.ty()
    }

    /// The property default, parsed; `null` without a property spec.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Whether any node reads the current zoom.
    pub fn is_zoom_dependent(&self) -> bool {
        is_zoom_dependent(self.expression.as_ref())
    }

    /// Whether any node reads feature data.
    pub fn is_feature_dependent(&self) -> bool {
        is_feature_dependent(self.expression.as_ref())
    }

    /// Evaluate, surfacing runtime errors to the caller.
    pub fn evaluate(
        &self,
        globals: &GlobalProperties,
        feature: Option<&Feature>,
    ) -> Result<Value, RuntimeError> {
        let mut ctx = EvaluationContext::new(globals);
        if let Some(feature) = feature {
            ctx = ctx.with_feature(feature);
        }
        self.expression.evaluate(&ctx)
    }

    /// Evaluate, substituting the property default for errors, `null`, NaN, and values
    /// outside an enum property's allowed set.
    pub fn evaluate_with_default(&self, globals: &GlobalProperties, feature: Option<&Feature>) -> Value {
        let result = match self.evaluate(globals, feature) {
            Ok(Value::Null) => return self.default.clone(),
            Ok(Value::Number(n)) if n.is_nan() => return self.default.clone(),
            other => other.and_then(|value| self.check_enum(value)),
        };
        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "expression evaluation failed, using property default");
                self.default.clone()
            }
        }
    }

    /// [`Self::evaluate_with_default`] for every feature in parallel.
    pub fn evaluate_features(&self, globals: &GlobalProperties, features: &[Feature]) -> Vec<Value> {
        features
            .par_iter()
            .map(|feature| self.evaluate_with_default(globals, Some(feature)))
            .collect()
    }

    fn check_enum(&self, value: Value) -> Result<Value, RuntimeError> {
        let Some(spec) = self.spec.as_ref().filter(|s| s.ty == "enum") else {
            return Ok(value);
        };
        if value.as_str().is_some_and(|s| spec.has_enum_value(s)) {
            return Ok(value);
        }
        let allowed = spec
            .enum_values()
            .iter()
            .map(|v| Json::from(*v).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(RuntimeError::new(format!(
            "Expected value to be one of {allowed}, but found {} instead.",
            value.to_json()
        )))
    }
}

/// Compile `expression` for the property described by `spec` using the built-in operators.
#[tracing::instrument(skip_all, fields(ty = spec.map(|s| s.ty.as_str())))]
pub fn create_expression(
    expression: &Json,
    spec: Option<&PropertySpec>,
) -> Result<StyleExpression, Vec<ParsingError>> {
    create_expression_with(Registry::standard(), expression, spec)
}

/// [`create_expression`] with a caller-supplied operator registry.
pub fn create_expression_with(
    registry: &Registry,
    expression: &Json,
    spec: Option<&PropertySpec>,
) -> Result<StyleExpression, Vec<ParsingError>> {
    let expected = spec.map(PropertySpec::expected_type);
    match parse_expression(registry, expression, expected.as_ref()) {
        Ok(parsed) => {
            tracing::debug!(ty = %parsed.ty(), "compiled expression");
            Ok(StyleExpression::new(parsed, spec))
        }
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "expression failed to compile");
            Err(errors)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/style_expression.rs"]
mod tests;
