use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::types::Type;
use crate::expression::Expression;
use crate::values::{ColorArray, Color, Formatted, NumberArray, Padding, ResolvedImage, Value};

/// Runtime conversion of a loosely typed argument into a structured value type.
#[derive(Debug)]
pub struct Coercion {
    ty: Type,
    arg: Box<dyn Expression>,
}

impl Coercion {
    /// Coerce `arg` to `ty`.
    pub fn new(ty: Type, arg: Box<dyn Expression>) -> Self {
        Self { ty, arg }
    }

    /// Whether an argument typed `actual` is converted at runtime to satisfy `expected`.
    pub(crate) fn applies(expected: &Type, actual: &Type) -> bool {
        let from_value = *actual == Type::Value;
        match expected {
            Type::Color | Type::Formatted | Type::ResolvedImage => {
                from_value || *actual == Type::String
            }
            Type::Padding | Type::NumberArray => {
                from_value || matches!(actual, Type::Number | Type::Array { .. })
            }
            Type::ColorArray => from_value || matches!(actual, Type::String | Type::Array { .. }),
            _ => false,
        }
    }

    fn failure(&self, value: &Value) -> RuntimeError {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_json().to_string(),
        };
        RuntimeError::new(format!(
            "Could not parse {} from value '{shown}'",
            self.ty.kind()
        ))
    }
}

impl Expression for Coercion {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let value = self.arg.evaluate(ctx)?;
        let coerced = match (&self.ty, &value) {
            (Type::Color, Value::Color(_))
            | (Type::Padding, Value::Padding(_))
            | (Type::NumberArray, Value::NumberArray(_))
            | (Type::ColorArray, Value::ColorArray(_))
            | (Type::Formatted, Value::Formatted(_))
            | (Type::ResolvedImage, Value::ResolvedImage(_)) => Some(value.clone()),
            (Type::Color, Value::String(s)) => Color::parse(s).map(Value::Color),
            (Type::Padding, v) => Padding::parse(&v.to_json()).map(Value::Padding),
            (Type::NumberArray, v) => NumberArray::parse(&v.to_json()).map(Value::NumberArray),
            (Type::ColorArray, v) => ColorArray::parse(&v.to_json()).map(Value::ColorArray),
            (Type::Formatted, v) => Some(Value::Formatted(Formatted::from_string(v.to_string()))),
            (Type::ResolvedImage, v) => {
                Some(Value::ResolvedImage(ResolvedImage::from_string(v.to_string())))
            }
            _ => None,
        };
        coerced.ok_or_else(|| self.failure(&value))
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.arg.as_ref());
    }

    fn output_defined(&self) -> bool {
        false
    }
}
