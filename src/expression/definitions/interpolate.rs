use serde_json::Value as Json;

use crate::expression::error::RuntimeError;
use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::parsing_context::ParsingContext;
use crate::expression::types::Type;
use crate::expression::Expression;
use crate::interpolate::{
    ColorSpace, InterpolationType, find_stop_less_than_or_equal_to, interpolate_value,
    interpolation_factor, is_interpolatable,
};
use crate::values::Value;

/// `["interpolate", ["linear"] | ["exponential", base], input, label, output, ...]`.
///
/// `interpolate-hcl` and `interpolate-lab` blend colors in those spaces.
#[derive(Debug)]
pub struct Interpolate {
    ty: Type,
    kind: InterpolationType,
    space: ColorSpace,
    input: Box<dyn Expression>,
    labels: Vec<f64>,
    outputs: Vec<Box<dyn Expression>>,
}

impl Interpolate {
    /// Parse `interpolate`, `interpolate-hcl` and `interpolate-lab` forms.
    pub fn parse(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
        let space = match args.first().and_then(Json::as_str) {
            Some("interpolate-hcl") => ColorSpace::Hcl,
            Some("interpolate-lab") => ColorSpace::Lab,
            _ => ColorSpace::Rgb,
        };

        let curve = match args.get(1) {
            Some(Json::Array(curve)) if !curve.is_empty() => curve,
            _ => return ctx.error_at("Expected an interpolation type expression.", &[1]),
        };
        let kind = match curve[0].as_str() {
            Some("linear") => InterpolationType::Linear,
            Some("exponential") => match curve.get(1).and_then(Json::as_f64) {
                Some(base) => InterpolationType::Exponential { base },
                None => {
                    return ctx
                        .error_at("Exponential interpolation requires a numeric base.", &[1, 1]);
                }
            },
            _ => {
                let shown = match &curve[0] {
                    Json::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return ctx.error_at(format!("Unknown interpolation type {shown}"), &[1, 0]);
            }
        };

        let argc = args.len() - 1;
        if argc < 4 {
            return ctx.error(format!(
                "Expected at least 4 arguments, but found only {argc}."
            ));
        }
        if argc % 2 != 0 {
            return ctx.error("Expected an even number of arguments.");
        }

        let input = ctx.parse(&args[2], 2, Some(&Type::Number))?;

        let mut output_type = match (space, ctx.expected_type()) {
            (ColorSpace::Hcl | ColorSpace::Lab, _) => Some(Type::Color),
            (_, Some(expected)) if *expected != Type::Value => Some(expected.clone()),
            _ => None,
        };

        let mut labels: Vec<f64> = Vec::new();
        let mut outputs = Vec::new();
        for (i, pair) in args[3..].chunks(2).enumerate() {
            let label_key = 3 + i * 2;
            let Some(label) = pair[0].as_f64() else {
                return ctx.error_at(
                    r#"Input/output pairs for "interpolate" expressions must be defined using literal numeric values (not computed expressions) for the input values."#,
                    &[label_key],
                );
            };
            if labels.last().is_some_and(|&prev| prev >= label) {
                return ctx.error_at(
                    r#"Input/output pairs for "interpolate" expressions must be arranged with input values in strictly ascending order."#,
                    &[label_key],
                );
            }
            let parsed = ctx.parse(&pair[1], label_key + 1, output_type.as_ref())?;
            if output_type.is_none() {
                output_type = Some(parsed.ty().clone());
            }
            labels.push(label);
            outputs.push(parsed);
        }

        let ty = output_type.unwrap_or(Type::Value);
        if !is_interpolatable(&ty) {
            return ctx.error(format!("Type {ty} is not interpolatable."));
        }

        Some(Box::new(Self {
            ty,
            kind,
            space,
            input,
            labels,
            outputs,
        }))
    }
}

impl Expression for Interpolate {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, RuntimeError> {
        let last = self.labels.len() - 1;
        if last == 0 {
            return self.outputs[0].evaluate(ctx);
        }

        let value = self.input.evaluate(ctx)?.as_number().unwrap_or(f64::NAN);
        if value <= self.labels[0] {
            return self.outputs[0].evaluate(ctx);
        }
        if value >= self.labels[last] {
            return self.outputs[last].evaluate(ctx);
        }

        let index = find_stop_less_than_or_equal_to(&self.labels, value);
        let t = interpolation_factor(
            self.kind,
            value,
            self.labels[index],
            self.labels[index + 1],
        );
        let lower = self.outputs[index].evaluate(ctx)?;
        let upper = self.outputs[index + 1].evaluate(ctx)?;
        Ok(interpolate_value(&lower, &upper, t, self.space))
    }

    fn each_child(&self, visit: &mut dyn FnMut(&dyn Expression)) {
        visit(self.input.as_ref());
        for output in &self.outputs {
            visit(output.as_ref());
        }
    }

    fn output_defined(&self) -> bool {
        self.outputs.iter().all(|o| o.output_defined())
    }
}
