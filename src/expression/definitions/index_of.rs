use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::{NativeType, Type, is_valid_native_type, is_valid_type};
use crate::expression::Expression;
use crate::values::Value;

const NEEDLE_TYPES: &[Type] = &[
    Type::Boolean,
    Type::String,
    Type::Number,
    Type::Null,
    Type::Value,
];

const NEEDLE_NATIVE_TYPES: &[NativeType] = &[
    NativeType::Boolean,
    NativeType::String,
    NativeType::Number,
    NativeType::Null,
];

/// Position of a needle in a string or array, `-1` if absent.
///
/// String results count characters, so `"b"` in `"🙂ab"` is `2`.
#[derive(Debug)]
pub struct IndexOf {
    ty: Type,
    needle: Box<dyn Expression>,
    haystack: Box<dyn Expression>,
    from_index: Option<Box<dyn Expression>>,
}

impl IndexOf {
    /// `["index-of", needle, haystack]` or `["index-of", needle, haystack, fromIndex]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if !(3..=4).contains(&args.len()) {
            return ctx.error(format!(
                "Expected 2 or 3 arguments, but found {} instead.",
                args.len() - 1
            ));
        }

        let needle = ctx.parse(&args[1], 1, Some(&Type::Value));
        let haystack = ctx.parse(&args[2], 2, Some(&Type::Value));
        let (needle, haystack) = (needle?, haystack?);

        if !is_valid_type(needle.ty(), NEEDLE_TYPES) {
            return ctx.error(format!(
                "Expected first argument to be of type boolean, string, number or null, but found {} instead",
                needle.ty()
            ));
        }

        let from_index = match args.get(3) {
            Some(raw) => Some(ctx.parse(raw, 3, Some(&Type::Number))?),
            None => None,
        };

        Some(Box::new(Self {
            ty: Type::Number,
            needle,
            haystack,
            from_index,
        }))
    }
}

impl Expression for IndexOf {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let needle = self.needle.evaluate(ctx)?;
        let haystack = self.haystack.evaluate(ctx)?;

        if !is_valid_native_type(&needle, NEEDLE_NATIVE_TYPES) {
            return Err(RuntimeError::new(format!(
                "Expected first argument to be of type boolean, string, number or null, but found {} instead.",
                needle.type_of()
            )));
        }

        let from_index = match &self.from_index {
            Some(e) => e.evaluate(ctx)?.as_number().unwrap_or(0.0),
            None => 0.0,
        };

        let found = match &haystack {
            Value::String(s) => index_in_str(s, &search_text(&needle), from_index),
            Value::Array(items) => index_in_array(items, &needle, from_index),
            other => {
                return Err(RuntimeError::new(format!(
                    "Expected second argument to be of type array or string, but found {} instead.",
                    other.type_of()
                )));
            }
        };
        Ok(Value::Number(found.map_or(-1.0, |i| i as f64)))
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.needle.as_ref());
        visit(self.haystack.as_ref());
        if let Some(from) = &self.from_index {
            visit(from.as_ref());
        }
    }

    fn output_defined(&self) -> bool {
        false
    }
}

/// Needle rendered for substring search. Non-string needles search for their text form.
fn search_text(needle: &Value) -> String {
    match needle {
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    }
}

/// Character index of the first match at or after character `from`.
fn index_in_str(haystack: &str, needle: &str, from: f64) -> Option<usize> {
    let skip = from.max(0.0) as usize;
    let start = haystack
        .char_indices()
        .nth(skip)
        .map_or(haystack.len(), |(byte, _)| byte);
    let byte = haystack[start..].find(needle)? + start;
    Some(haystack[..byte].chars().count())
}

/// First index at or after `from` holding a value equal to `needle`. Negative `from` counts
/// back from the end.
fn index_in_array(items: &[Value], needle: &Value, from: f64) -> Option<usize> {
    let from = if from.is_nan() { 0.0 } else { from.trunc() };
    let start = if from < 0.0 {
        (items.len() as f64 + from).max(0.0) as usize
    } else {
        from as usize
    };
    items
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, item)| *item == needle)
        .map(|(i, _)| i)
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/definitions/index_of.rs"]
mod tests;
