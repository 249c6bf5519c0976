use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::{Type, check_subtype};
use crate::expression::Expression;
use crate::values::Value;

pub(crate) const OPERATORS: &[&str] = &["string", "number", "boolean", "object", "array"];

/// Runtime type check: yields the first argument whose value has the asserted type.
#[derive(Debug)]
pub struct Assertion {
    ty: Type,
    args: Vec<Box<dyn Expression>>,
}

impl Assertion {
    /// Assert that one of `args` evaluates to `ty`.
    pub fn new(ty: Type, args: Vec<Box<dyn Expression>>) -> Self {
        Self { ty, args }
    }

    /// Whether an argument typed `actual` must be checked at runtime to satisfy `expected`.
    pub(crate) fn applies(expected: &Type, actual: &Type) -> bool {
        *actual == Type::Value
            && matches!(
                expected,
                Type::String | Type::Number | Type::Boolean | Type::Object | Type::Array { .. }
            )
    }

    /// `["string", v, ...]`, `["array", itemType?, length?, v]` and friends.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if args.len() < 2 {
            return ctx.error("Expected at least one argument.");
        }
        let name = args[0].as_str().unwrap_or_default();

        let mut first = 1;
        let ty = match name {
            "string" => Type::String,
            "number" => Type::Number,
            "boolean" => Type::Boolean,
            "object" => Type::Object,
            _ => {
                let mut item = Type::Value;
                let mut len = None;
                if args.len() > 2 {
                    item = match args[1].as_str() {
                        Some("string") => Type::String,
                        Some("number") => Type::Number,
                        Some("boolean") => Type::Boolean,
                        _ => {
                            return ctx.error_at(
                                r#"The item type argument of "array" must be one of string, number, boolean"#,
                                &[1],
                            );
                        }
                    };
                    first += 1;
                }
                if args.len() > 3 {
                    match &args[2] {
                        Json::Null => {}
                        Json::Number(n) if n.as_u64().is_some() => {
                            len = n.as_u64().map(|n| n as usize);
                        }
                        _ => {
                            return ctx.error_at(
                                r#"The length argument to "array" must be a positive integer literal"#,
                                &[2],
                            );
                        }
                    }
                    first += 1;
                }
                Type::array(item, len)
            }
        };

        let mut parsed = Vec::with_capacity(args.len() - first);
        for (i, raw) in args.iter().enumerate().skip(first) {
            parsed.push(ctx.parse(raw, i, Some(&Type::Value))?);
        }
        Some(Box::new(Self::new(ty, parsed)))
    }
}

impl Expression for Assertion {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let mut last = Type::Null;
        for arg in &self.args {
            let value = arg.evaluate(ctx)?;
            let found = value.type_of();
            if check_subtype(&self.ty, &found).is_none() {
                return Ok(value);
            }
            last = found;
        }
        Err(RuntimeError::new(format!(
            "Expected value to be of type {}, but found {} instead.",
            self.ty, last
        )))
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        for arg in &self.args {
            visit(arg.as_ref());
        }
    }

    fn output_defined(&self) -> bool {
        self.args.iter().all(|a| a.output_defined())
    }
}
