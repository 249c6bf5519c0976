use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::{Expression, Reads};
use crate::values::Value;

/// Property lookup on the current feature, or on an object argument.
#[derive(Debug)]
pub struct Get {
    ty: Type,
    key: Box<dyn Expression>,
    object: Option<Box<dyn Expression>>,
}

impl Get {
    /// `["get", key]` or `["get", key, object]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if !(2..=3).contains(&args.len()) {
            return ctx.error(format!(
                "Expected 1 or 2 arguments, but found {} instead.",
                args.len() - 1
            ));
        }
        let key = ctx.parse(&args[1], 1, Some(&Type::String))?;
        let object = match args.get(2) {
            Some(raw) => Some(ctx.parse(raw, 2, Some(&Type::Object))?),
            None => None,
        };
        Some(Box::new(Self {
            ty: Type::Value,
            key,
            object,
        }))
    }
}

impl Expression for Get {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let key = self.key.evaluate(ctx)?;
        let key = key.as_str().unwrap_or_default();
        match &self.object {
            Some(object) => match object.evaluate(ctx)? {
                Value::Object(mut map) => Ok(map.remove(key).unwrap_or(Value::Null)),
                _ => Ok(Value::Null),
            },
            None => Ok(ctx.property(key).map_or(Value::Null, Value::from_json)),
        }
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.key.as_ref());
        if let Some(object) = &self.object {
            visit(object.as_ref());
        }
    }

    fn output_defined(&self) -> bool {
        false
    }

    fn reads(&self) -> Reads {
        Reads {
            feature: self.object.is_none(),
            ..Reads::NONE
        }
    }
}
