use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::{Expression, Reads};
use crate::values::Value;

/// `["zoom"]`: the current map zoom.
#[derive(Debug)]
pub struct Zoom {
    ty: Type,
}

impl Zoom {
    /// Parse `["zoom"]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if args.len() != 1 {
            return ctx.error(format!(
                "Expected no arguments, but found {} instead.",
                args.len() - 1
            ));
        }
        Some(Box::new(Self { ty: Type::Number }))
    }
}

impl Expression for Zoom {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        ctx.globals
            .zoom
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::new("The zoom level is not available in this context."))
    }

    fn each_child(&self, _visit: &mut dyn FnMut(&dyn Expression)) {}

    fn output_defined(&self) -> bool {
        false
    }

    fn reads(&self) -> Reads {
        Reads {
            zoom: true,
            ..Reads::NONE
        }
    }
}
