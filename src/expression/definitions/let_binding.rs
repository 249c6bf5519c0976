use std::sync::Arc;

use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::{Binding, ParsingContext, js_typeof};
use crate::expression::types::Type;
use crate::expression::Expression;
use crate::values::Value;

/// `["let", name, value, ..., body]`.
#[derive(Debug)]
pub struct Let {
    bindings: Vec<Binding>,
    body: Box<dyn Expression>,
}

impl Let {
    /// Bindings are compiled in the enclosing scope; the body sees all of them.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if args.len() < 4 {
            return ctx.error(format!(
                "Expected at least 3 arguments, but found {} instead.",
                args.len() - 1
            ));
        }

        let last = args.len() - 1;
        let mut bindings: Vec<Binding> = Vec::new();
        for i in (1..last).step_by(2) {
            let Json::String(name) = &args[i] else {
                return ctx.error_at(
                    format!("Expected string, but found {} instead.", js_typeof(&args[i])),
                    &[i],
                );
            };
            if !is_valid_name(name) {
                return ctx.error_at(
                    "Variable names must contain only alphanumeric characters or '_'.",
                    &[i],
                );
            }
            let value = ctx.parse(&args[i + 1], i + 1, None)?;
            bindings.push((name.clone(), Arc::from(value)));
        }

        let expected = ctx.expected_type().cloned();
        let body = ctx.parse_with_bindings(&args[last], last, expected.as_ref(), bindings.clone())?;
        Some(Box::new(Self { bindings, body }))
    }
}

fn is_valid_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Expression for Let {
    fn ty(&self) -> &Type {
        self.body.ty()
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        self.body.evaluate(ctx)
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        for (_, value) in &self.bindings {
            visit(value.as_ref());
        }
        visit(self.body.as_ref());
    }

    fn output_defined(&self) -> bool {
        self.body.output_defined()
    }
}
