use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::Expression;
use crate::values::Value;

/// A constant.
#[derive(Debug, Clone)]
pub struct Literal {
    ty: Type,
    value: Value,
}

impl Literal {
    /// Constant `value` typed as `ty`.
    pub fn new(value: Value, ty: Type) -> Self {
        Self { ty, value }
    }

    /// `["literal", value]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if args.len() != 2 {
            return ctx.error(format!(
                "'literal' expression requires exactly one argument, but found {} instead.",
                args.len() - 1
            ));
        }

        let value = Value::from_json(&args[1]);
        let mut ty = value.type_of();

        // `[]` takes the expected array type so it can satisfy e.g. array<string>.
        if let (Type::Array { len: Some(0), .. }, Some(expected @ Type::Array { len, .. })) =
            (&ty, ctx.expected_type())
            && matches!(len, None | Some(0))
        {
            ty = expected.clone();
        }

        Some(Box::new(Self::new(value, ty)))
    }
}

impl Expression for Literal {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, _ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        Ok(self.value.clone())
    }

    fn each_child(&self, _visit: &mut dyn FnMut(&dyn Expression)) {}

    fn output_defined(&self) -> bool {
        true
    }

    fn literal_value(&self) -> Option<&Value> {
        Some(&self.value)
    }
}
