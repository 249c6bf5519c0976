use std::sync::Arc;

use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::{Expression, Reads, subtree_reads};
use crate::values::Value;

/// Reference to a name bound by an enclosing `let`.
///
/// The bound expression belongs to the `let`; `each_child` does not revisit it.
#[derive(Debug)]
pub struct Var {
    ty: Type,
    name: String,
    bound: Arc<dyn Expression>,
}

impl Var {
    /// Reference `name`, resolved to `bound`.
    pub fn new(name: impl Into<String>, bound: Arc<dyn Expression>) -> Self {
        Self {
            ty: bound.ty().clone(),
            name: name.into(),
            bound,
        }
    }

    /// Bound variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `["var", name]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        let name = match args {
            [_, Json::String(name)] => name,
            _ => return ctx.error("'var' expression requires exactly one string literal argument."),
        };

        match ctx.scope().get(name) {
            Some(bound) => Some(Box::new(Self::new(name.clone(), bound))),
            None => ctx.error_at(
                format!(
                    r#"Unknown variable "{name}". Make sure "{name}" has been bound in an enclosing "let" expression before using it."#
                ),
                &[1],
            ),
        }
    }
}

impl Expression for Var {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        self.bound.evaluate(ctx)
    }

    fn each_child(&self, _visit: &mut dyn FnMut(&dyn Expression)) {}

    fn output_defined(&self) -> bool {
        false
    }

    // Constant iff the bound value is, so a body over constant bindings still folds.
    fn reads(&self) -> Reads {
        subtree_reads(self.bound.as_ref())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/definitions/var.rs"]
mod tests;
