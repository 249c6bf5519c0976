use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value as Json;

use crate::expression::definitions::Registry;
use crate::expression::definitions::assertion::Assertion;
use crate::expression::definitions::coercion::Coercion;
use crate::expression::definitions::literal::Literal;
use crate::expression::error::ParsingError;
use crate::expression::evaluation_context::{EvaluationContext, GlobalProperties};
use crate::expression::types::{Type, check_subtype};
use crate::expression::{Expression, is_constant};

/// A name bound by `let` together with its compiled value.
pub type Binding = (String, Arc<dyn Expression>);

/// Lexical scope. Cheap to clone; children shadow parents without mutating them.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    frame: Option<Rc<Frame>>,
}

#[derive(Debug)]
struct Frame {
    parent: Scope,
    bindings: Vec<Binding>,
}

impl Scope {
    /// A child scope holding `bindings` on top of `self`.
    pub fn concat(&self, bindings: Vec<Binding>) -> Self {
        Self {
            frame: Some(Rc::new(Frame {
                parent: self.clone(),
                bindings,
            })),
        }
    }

    /// Innermost binding for `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Expression>> {
        let frame = self.frame.as_ref()?;
        frame
            .bindings
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, e)| Arc::clone(e))
            .or_else(|| frame.parent.get(name))
    }

    /// Whether `name` is bound here or in any parent.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Recursive compiler from JSON to typed nodes.
///
/// One root context per compilation; nested arguments get transient child
/// contexts that extend the argument path and share the error sink.
pub struct ParsingContext<'a> {
    registry: &'a Registry,
    path: Vec<usize>,
    scope: Scope,
    expected_type: Option<Type>,
    errors: &'a mut Vec<ParsingError>,
}

impl<'a> ParsingContext<'a> {
    /// Root context writing errors into `errors`.
    pub fn new(
        registry: &'a Registry,
        errors: &'a mut Vec<ParsingError>,
        expected_type: Option<Type>,
    ) -> Self {
        Self {
            registry,
            path: Vec::new(),
            scope: Scope::default(),
            expected_type,
            errors,
        }
    }

    /// Type the caller requires of this context's expression.
    pub fn expected_type(&self) -> Option<&Type> {
        self.expected_type.as_ref()
    }

    /// Current lexical bindings.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Argument path from the root to this context.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Record an error at this context's path. Always returns `None`.
    pub fn error<T>(&mut self, message: impl Into<String>) -> Option<T> {
        self.error_at(message, &[])
    }

    /// Record an error at this context's path extended by `keys`. Always returns `None`.
    pub fn error_at<T>(&mut self, message: impl Into<String>, keys: &[usize]) -> Option<T> {
        let mut path = self.path.clone();
        path.extend_from_slice(keys);
        self.errors.push(ParsingError::new(path, message));
        None
    }

    /// Compile argument `index` of the current expression.
    pub fn parse(
        &mut self,
        expr: &Json,
        index: usize,
        expected: Option<&Type>,
    ) -> Option<Box<dyn Expression>> {
        self.child(index, expected, None).compile(expr)
    }

    /// Compile argument `index` in a child scope holding `bindings`.
    pub fn parse_with_bindings(
        &mut self,
        expr: &Json,
        index: usize,
        expected: Option<&Type>,
        bindings: Vec<Binding>,
    ) -> Option<Box<dyn Expression>> {
        self.child(index, expected, Some(bindings)).compile(expr)
    }

    fn child(
        &mut self,
        index: usize,
        expected: Option<&Type>,
        bindings: Option<Vec<Binding>>,
    ) -> ParsingContext<'_> {
        let mut path = self.path.clone();
        path.push(index);
        let scope = match bindings {
            Some(b) => self.scope.concat(b),
            None => self.scope.clone(),
        };
        ParsingContext {
            registry: self.registry,
            path,
            scope,
            expected_type: expected.cloned(),
            errors: &mut *self.errors,
        }
    }

    /// Compile `expr` at this context's own path.
    pub fn compile(&mut self, expr: &Json) -> Option<Box<dyn Expression>> {
        let wrapped;
        let items: &[Json] = match expr {
            Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_) => {
                wrapped = [Json::from("literal"), expr.clone()];
                &wrapped
            }
            Json::Array(items) => items,
            Json::Object(_) => {
                return self.error(r#"Bare objects invalid. Use ["literal", {...}] instead."#);
            }
        };

        let Some(op) = items.first() else {
            return self.error(
                r#"Expected an array with at least one element. If you wanted a literal array, use ["literal", []]."#,
            );
        };
        let Some(name) = op.as_str() else {
            return self.error_at(
                format!(
                    r#"Expression name must be a string, but found {} instead. If you wanted a literal array, use ["literal", [...]]."#,
                    js_typeof(op)
                ),
                &[0],
            );
        };
        let Some(parse_fn) = self.registry.get(name) else {
            return self.error_at(
                format!(
                    r#"Unknown expression "{name}". If you wanted a literal array, use ["literal", [...]]."#
                ),
                &[0],
            );
        };

        let parsed = parse_fn(items, self)?;
        let parsed = match self.expected_type.clone() {
            Some(expected) => self.annotate(parsed, &expected)?,
            None => parsed,
        };
        self.fold_constant(parsed)
    }

    /// Wrap `parsed` in a runtime assertion or coercion when its type is looser than
    /// `expected`, or record a type mismatch.
    fn annotate(
        &mut self,
        parsed: Box<dyn Expression>,
        expected: &Type,
    ) -> Option<Box<dyn Expression>> {
        let actual = parsed.ty();
        if Assertion::applies(expected, actual) {
            return Some(Box::new(Assertion::new(expected.clone(), vec![parsed])));
        }
        if Coercion::applies(expected, actual) {
            return Some(Box::new(Coercion::new(expected.clone(), parsed)));
        }
        if let Some(message) = check_subtype(expected, actual) {
            return self.error(message);
        }
        Some(parsed)
    }

    fn fold_constant(&mut self, parsed: Box<dyn Expression>) -> Option<Box<dyn Expression>> {
        if parsed.literal_value().is_some()
            || *parsed.ty() == Type::ResolvedImage
            || !is_constant(parsed.as_ref())
        {
            return Some(parsed);
        }
        let globals = GlobalProperties::default();
        match parsed.evaluate(&EvaluationContext::new(&globals)) {
            Ok(value) => Some(Box::new(Literal::new(value, parsed.ty().clone()))),
            Err(e) => self.error(e.message),
        }
    }
}

/// Name of the host-language dynamic type of a raw JSON value.
pub(crate) fn js_typeof(v: &Json) -> &'static str {
    match v {
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Null | Json::Array(_) | Json::Object(_) => "object",
    }
}

/// Compile `expr` with a fresh error sink.
pub fn parse_expression(
    registry: &Registry,
    expr: &Json,
    expected: Option<&Type>,
) -> Result<Box<dyn Expression>, Vec<ParsingError>> {
    let mut errors = Vec::new();
    let parsed = ParsingContext::new(registry, &mut errors, expected.cloned()).compile(expr);
    match parsed {
        Some(e) if errors.is_empty() => Ok(e),
        _ => Err(errors),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parsing_context.rs"]
mod tests;
