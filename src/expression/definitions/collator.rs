use serde_json::Value as Json;

use crate::expression::collator::Collator;
use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::Expression;
use crate::values::Value;

/// `["collator", {"case-sensitive", "diacritic-sensitive", "locale"}]`.
#[derive(Debug)]
pub struct CollatorExpression {
    ty: Type,
    case_sensitive: Box<dyn Expression>,
    diacritic_sensitive: Box<dyn Expression>,
    locale: Option<Box<dyn Expression>>,
}

impl CollatorExpression {
    /// Each option may itself be an expression; omitted flags default to `false`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if args.len() != 2 {
            return ctx.error("Expected one argument.");
        }
        let Json::Object(options) = &args[1] else {
            return ctx.error("Collator options argument must be an object.");
        };

        let flag = |key: &str| options.get(key).cloned().unwrap_or(Json::Bool(false));
        let case_sensitive = ctx.parse(&flag("case-sensitive"), 1, Some(&Type::Boolean))?;
        let diacritic_sensitive =
            ctx.parse(&flag("diacritic-sensitive"), 1, Some(&Type::Boolean))?;
        let locale = match options.get("locale") {
            Some(raw) if !raw.is_null() => Some(ctx.parse(raw, 1, Some(&Type::String))?),
            _ => None,
        };

        Some(Box::new(Self {
            ty: Type::Collator,
            case_sensitive,
            diacritic_sensitive,
            locale,
        }))
    }
}

impl Expression for CollatorExpression {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let case_sensitive = self.case_sensitive.evaluate(ctx)?.as_bool().unwrap_or(false);
        let diacritic_sensitive = self
            .diacritic_sensitive
            .evaluate(ctx)?
            .as_bool()
            .unwrap_or(false);
        let locale = match &self.locale {
            Some(e) => match e.evaluate(ctx)? {
                Value::String(s) => Some(s),
                _ => None,
            },
            None => None,
        };
        Ok(Value::Collator(Collator::new(
            case_sensitive,
            diacritic_sensitive,
            locale.as_deref(),
        )))
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.case_sensitive.as_ref());
        visit(self.diacritic_sensitive.as_ref());
        if let Some(locale) = &self.locale {
            visit(locale.as_ref());
        }
    }

    fn output_defined(&self) -> bool {
        false
    }
}

/// `["resolved-locale", collator]`.
#[derive(Debug)]
pub struct ResolvedLocale {
    ty: Type,
    collator: Box<dyn Expression>,
}

impl ResolvedLocale {
    /// Parse `["resolved-locale", collator]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        if args.len() != 2 {
            return ctx.error("Expected one argument.");
        }
        let collator = ctx.parse(&args[1], 1, Some(&Type::Collator))?;
        Some(Box::new(Self {
            ty: Type::String,
            collator,
        }))
    }
}

impl Expression for ResolvedLocale {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        match self.collator.evaluate(ctx)? {
            Value::Collator(c) => Ok(Value::String(c.resolved_locale())),
            other => Err(RuntimeError::new(format!(
                "Expected collator, but found {} instead.",
                other.type_of()
            ))),
        }
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.collator.as_ref());
    }

    fn output_defined(&self) -> bool {
        false
    }
}
