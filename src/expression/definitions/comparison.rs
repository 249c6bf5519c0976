use std::cmp::Ordering;

use serde_json::Value as Json;

use crate::expression::definitions::assertion::Assertion;
use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::Expression;
use crate::values::Value;

pub(crate) const OPERATORS: &[&str] = &["==", "!=", "<", "<=", ">", ">="];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    fn is_order(self) -> bool {
        !matches!(self, Self::Eq | Self::Ne)
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }

    fn comparable(self, t: &Type) -> bool {
        match self {
            Self::Eq | Self::Ne => matches!(
                t,
                Type::Boolean | Type::String | Type::Number | Type::Null | Type::Value
            ),
            _ => matches!(t, Type::String | Type::Number | Type::Value),
        }
    }
}

/// Binary comparison, optionally through a collator for strings.
#[derive(Debug)]
pub struct Comparison {
    ty: Type,
    op: CmpOp,
    lhs: Box<dyn Expression>,
    rhs: Box<dyn Expression>,
    collator: Option<Box<dyn Expression>>,
    has_untyped_argument: bool,
}

impl Comparison {
    /// `[op, lhs, rhs]` or `[op, lhs, rhs, collator]`.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        let Some(op) = args.first().and_then(Json::as_str).and_then(CmpOp::from_name) else {
            return ctx.error("Unknown comparison operator.");
        };
        if !(3..=4).contains(&args.len()) {
            return ctx.error("Expected two or three arguments.");
        }

        let mut lhs = ctx.parse(&args[1], 1, Some(&Type::Value))?;
        if !op.comparable(lhs.ty()) {
            return ctx.error_at(
                format!(
                    r#""{}" comparisons are not supported for type '{}'."#,
                    op.as_str(),
                    lhs.ty()
                ),
                &[1],
            );
        }
        let mut rhs = ctx.parse(&args[2], 2, Some(&Type::Value))?;
        if !op.comparable(rhs.ty()) {
            return ctx.error_at(
                format!(
                    r#""{}" comparisons are not supported for type '{}'."#,
                    op.as_str(),
                    rhs.ty()
                ),
                &[2],
            );
        }

        let (lt, rt) = (lhs.ty().clone(), rhs.ty().clone());
        if lt.kind() != rt.kind() && lt != Type::Value && rt != Type::Value {
            return ctx.error(format!("Cannot compare types '{lt}' and '{rt}'."));
        }

        if op.is_order() {
            if lt == Type::Value && rt != Type::Value {
                lhs = Box::new(Assertion::new(rt.clone(), vec![lhs]));
            } else if lt != Type::Value && rt == Type::Value {
                rhs = Box::new(Assertion::new(lt.clone(), vec![rhs]));
            }
        }

        let collator = match args.get(3) {
            Some(raw) => {
                let stringish = |t: &Type| matches!(t, Type::String | Type::Value);
                if !stringish(&lt) && !stringish(&rt) {
                    return ctx.error("Cannot use collator to compare non-string types.");
                }
                Some(ctx.parse(raw, 3, Some(&Type::Collator))?)
            }
            None => None,
        };

        let has_untyped_argument = *lhs.ty() == Type::Value || *rhs.ty() == Type::Value;
        Some(Box::new(Self {
            ty: Type::Boolean,
            op,
            lhs,
            rhs,
            collator,
            has_untyped_argument,
        }))
    }

    fn compare_basic(&self, lhs: &Value, rhs: &Value) -> bool {
        let ordering = match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (a, b) if !self.op.is_order() => Some(if a == b {
                Ordering::Equal
            } else {
                Ordering::Less
            }),
            _ => None,
        };
        // NaN compares false under every operator except `!=`.
        ordering.map_or(self.op == CmpOp::Ne, |o| self.op.accepts(o))
    }
}

impl Expression for Comparison {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let lhs = self.lhs.evaluate(ctx)?;
        let rhs = self.rhs.evaluate(ctx)?;

        if self.op.is_order() && self.has_untyped_argument {
            let (lt, rt) = (lhs.type_of(), rhs.type_of());
            if lt.kind() != rt.kind() || !matches!(lt, Type::String | Type::Number) {
                return Err(RuntimeError::new(format!(
                    r#"Expected arguments for "{}" to be (string, string) or (number, number), but found ({}, {}) instead."#,
                    self.op.as_str(),
                    lt.kind(),
                    rt.kind()
                )));
            }
        }

        let Some(collator) = &self.collator else {
            return Ok(Value::Boolean(self.compare_basic(&lhs, &rhs)));
        };
        let (Value::String(a), Value::String(b)) = (&lhs, &rhs) else {
            return Ok(Value::Boolean(self.compare_basic(&lhs, &rhs)));
        };
        match collator.evaluate(ctx)? {
            Value::Collator(c) => Ok(Value::Boolean(self.op.accepts(c.compare(a, b)))),
            other => Err(RuntimeError::new(format!(
                "Expected collator, but found {} instead.",
                other.type_of()
            ))),
        }
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.lhs.as_ref());
        visit(self.rhs.as_ref());
        if let Some(collator) = &self.collator {
            visit(collator.as_ref());
        }
    }

    fn output_defined(&self) -> bool {
        true
    }
}
