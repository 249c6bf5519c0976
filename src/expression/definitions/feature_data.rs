use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::{Expression, Reads};
use crate::values::Value;

pub(crate) const OPERATORS: &[&str] = &["id", "geometry-type", "heatmap-density"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor {
    Id,
    GeometryType,
    HeatmapDensity,
}

/// Argument-free reads of feature metadata or render-time globals:
/// `["id"]`, `["geometry-type"]` and `["heatmap-density"]`.
#[derive(Debug)]
pub struct FeatureData {
    ty: Type,
    accessor: Accessor,
}

impl FeatureData {
    /// Parse one of the accessor operators.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        let (accessor, ty) = match args.first().and_then(Json::as_str) {
            Some("id") => (Accessor::Id, Type::Value),
            Some("geometry-type") => (Accessor::GeometryType, Type::String),
            Some("heatmap-density") => (Accessor::HeatmapDensity, Type::Number),
            other => return ctx.error(format!("Unknown accessor {other:?}.")),
        };
        if args.len() != 1 {
            return ctx.error(format!(
                "Expected no arguments, but found {} instead.",
                args.len() - 1
            ));
        }
        Some(Box::new(Self { ty, accessor }))
    }
}

impl Expression for FeatureData {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        Ok(match self.accessor {
            Accessor::Id => ctx
                .feature
                .and_then(|f| f.id.as_ref())
                .map_or(Value::Null, Value::from_json),
            Accessor::GeometryType => ctx
                .feature
                .and_then(|f| f.geometry_type)
                .map_or(Value::Null, |g| Value::from(g.as_str())),
            Accessor::HeatmapDensity => Value::Number(ctx.globals.heatmap_density.unwrap_or(0.0)),
        })
    }

    fn each_child(&self, _visit: &mut dyn FnMut(&dyn Expression)) {}

    fn output_defined(&self) -> bool {
        false
    }

    fn reads(&self) -> Reads {
        match self.accessor {
            Accessor::Id | Accessor::GeometryType => Reads {
                feature: true,
                ..Reads::NONE
            },
            Accessor::HeatmapDensity => Reads {
                heatmap_density: true,
                ..Reads::NONE
            },
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/definitions/feature_data.rs"]
mod tests;
