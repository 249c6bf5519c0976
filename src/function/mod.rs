//! Legacy stop-based property functions.
//!
//! A function maps zoom, a feature property, or both to a property value through a
//! table of stops. [`create_function`] validates and pre-parses the definition once;
//! the resulting [`CompiledFunction`] is immutable and evaluates without re-parsing.

pub(crate) mod error;
pub(crate) mod spec;

use std::collections::HashMap;

use rayon::prelude::*;
use serde_json::Value as Json;

use crate::expression::evaluation_context::{Feature, GlobalProperties};
use crate::expression::types::NativeType;
use crate::interpolate::{
    ColorSpace, InterpolationType, exponential_interpolation, find_stop_less_than_or_equal_to,
    interpolate_value, interpolation_factor,
};
use crate::values::{Color, Formatted, ResolvedImage, Value};

pub use error::FunctionError;
pub use spec::{ExpressionSpec, FunctionParameters, PropertySpec, Stop};

/// How stop outputs are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionType {
    /// Blend the two bracketing outputs.
    Exponential,
    /// Output of the last stop at or below the input.
    Interval,
    /// Output of the stop whose input equals the input.
    Categorical,
    /// The input itself, converted to the property type.
    Identity,
}

impl FunctionType {
    /// Parse a style-spec function type name.
    pub fn parse(name: &str) -> Result<Self, FunctionError> {
        match name {
            "exponential" => Ok(Self::Exponential),
            "interval" => Ok(Self::Interval),
            "categorical" => Ok(Self::Categorical),
            "identity" => Ok(Self::Identity),
            other => Err(FunctionError::UnknownType(other.to_owned())),
        }
    }

    /// Style-spec name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exponential => "exponential",
            Self::Interval => "interval",
            Self::Categorical => "categorical",
            Self::Identity => "identity",
        }
    }
}

/// Which inputs a compiled function reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Feature property only.
    Source,
    /// Zoom only.
    Camera,
    /// Zoom and a feature property.
    Composite,
}

impl FunctionKind {
    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Camera => "camera",
            Self::Composite => "composite",
        }
    }
}

#[derive(Debug, Clone)]
enum StopTable {
    Empty,
    Numeric {
        labels: Vec<f64>,
        outputs: Vec<Value>,
    },
    /// Keyed by the input's string form; only inputs of `key_type` are looked up.
    Categorical {
        key_type: NativeType,
        table: HashMap<String, Value>,
    },
}

/// One-dimensional function over a single input.
#[derive(Debug, Clone)]
struct StopFunction {
    ty: FunctionType,
    base: f64,
    color_space: ColorSpace,
    stops: StopTable,
    default: Option<Value>,
    spec_default: Option<Value>,
    spec: PropertySpec,
}

impl StopFunction {
    fn new(
        parameters: &FunctionParameters,
        spec: &PropertySpec,
        ty: FunctionType,
        color_space: ColorSpace,
    ) -> Result<Self, FunctionError> {
        let stops = match ty {
            FunctionType::Identity => StopTable::Empty,
            FunctionType::Categorical => {
                let first = parameters.stops.first().ok_or(FunctionError::EmptyStops)?;
                let key_type = Value::from_json(&first.0).native_type();
                let mut table = HashMap::with_capacity(parameters.stops.len());
                for (index, stop) in parameters.stops.iter().enumerate() {
                    let output = parse_stop_output(spec, index, &stop.1)?;
                    table.insert(key_string(&Value::from_json(&stop.0)), output);
                }
                StopTable::Categorical { key_type, table }
            }
            FunctionType::Interval | FunctionType::Exponential => {
                if parameters.stops.is_empty() {
                    return Err(FunctionError::EmptyStops);
                }
                let mut labels = Vec::with_capacity(parameters.stops.len());
                let mut outputs = Vec::with_capacity(parameters.stops.len());
                for (index, stop) in parameters.stops.iter().enumerate() {
                    let label = stop.0.as_f64().ok_or(FunctionError::NonNumericStop { index })?;
                    if labels.last().is_some_and(|&prev| label < prev) {
                        return Err(FunctionError::UnsortedStops { index });
                    }
                    labels.push(label);
                    outputs.push(parse_stop_output(spec, index, &stop.1)?);
                }
                StopTable::Numeric { labels, outputs }
            }
        };

        Ok(Self {
            ty,
            base: parameters.base.unwrap_or(1.0),
            color_space,
            stops,
            default: resolve_default(parameters, spec)?,
            spec_default: spec.default.as_ref().map(Value::from_json),
            spec: spec.clone(),
        })
    }

    fn coalesce(&self, value: Option<Value>) -> Option<Value> {
        value
            .or_else(|| self.default.clone())
            .or_else(|| self.spec_default.clone())
    }

    fn evaluate(&self, input: Option<&Value>) -> Option<Value> {
        match (&self.stops, self.ty) {
            (_, FunctionType::Identity) => self.coalesce(input.and_then(|v| self.identity(v))),
            (StopTable::Categorical { key_type, table }, _) => {
                // No coercion across input types: "1" never matches a numeric key.
                let found = input
                    .filter(|v| v.native_type() == *key_type)
                    .and_then(|v| table.get(&key_string(v)).cloned());
                self.coalesce(found)
            }
            (StopTable::Numeric { labels, outputs }, _) => match input.and_then(Value::as_number) {
                Some(x) => Some(self.numeric(labels, outputs, x)),
                None => self.coalesce(None),
            },
            _ => self.coalesce(None),
        }
    }

    fn numeric(&self, labels: &[f64], outputs: &[Value], x: f64) -> Value {
        let last = labels.len() - 1;
        if last == 0 || x <= labels[0] {
            return outputs[0].clone();
        }
        if x >= labels[last] {
            return outputs[last].clone();
        }
        let index = find_stop_less_than_or_equal_to(labels, x);
        if self.ty != FunctionType::Exponential {
            return outputs[index].clone();
        }
        let t = exponential_interpolation(x, self.base, labels[index], labels[index + 1]);
        blend(&self.spec, self.color_space, &outputs[index], &outputs[index + 1], t)
    }

    fn identity(&self, input: &Value) -> Option<Value> {
        if *input == Value::Null && self.spec.ty != "enum" {
            return None;
        }
        match self.spec.ty.as_str() {
            "color" => input.as_str().and_then(Color::parse).map(Value::Color),
            "formatted" => Some(Value::Formatted(Formatted::from_string(input.to_string()))),
            "resolvedImage" => Some(Value::ResolvedImage(ResolvedImage::from_string(
                input.to_string(),
            ))),
            "padding" | "numberArray" | "colorArray" => self.spec.parse_value(&input.to_json()),
            "enum" => self
                .spec
                .has_enum_value(&key_string(input))
                .then(|| input.clone()),
            other => (input.native_type().as_str() == other).then(|| input.clone()),
        }
    }
}

fn parse_stop_output(spec: &PropertySpec, index: usize, raw: &Json) -> Result<Value, FunctionError> {
    spec.parse_value(raw)
        .ok_or_else(|| FunctionError::InvalidStopOutput {
            index,
            value: raw.to_string(),
            ty: spec.ty.clone(),
        })
}

/// Parsed `parameters.default`, falling back to the parsed property default for types
/// with a value parser.
fn resolve_default(
    parameters: &FunctionParameters,
    spec: &PropertySpec,
) -> Result<Option<Value>, FunctionError> {
    if !spec.has_value_parser() {
        return Ok(parameters.default.as_ref().map(Value::from_json));
    }
    let Some(raw) = parameters.default.as_ref().or(spec.default.as_ref()) else {
        return Ok(None);
    };
    spec.parse_value(raw)
        .map(Some)
        .ok_or_else(|| FunctionError::InvalidDefault {
            value: raw.to_string(),
            ty: spec.ty.clone(),
        })
}

/// String form used to key categorical stops.
fn key_string(v: &Value) -> String {
    match v {
        Value::Null => "null".to_owned(),
        Value::Number(n) if *n == 0.0 => "0".to_owned(),
        other => other.to_string(),
    }
}

fn blend(spec: &PropertySpec, space: ColorSpace, lower: &Value, upper: &Value, t: f64) -> Value {
    if spec.is_interpolatable() {
        interpolate_value(lower, upper, t, space)
    } else {
        lower.clone()
    }
}

#[derive(Debug, Clone)]
struct Composite {
    functions: Vec<CompiledFunction>,
    fallback: Option<Value>,
    color_space: ColorSpace,
    spec: PropertySpec,
}

impl Composite {
    fn evaluate(
        &self,
        zooms: &[f64],
        globals: &GlobalProperties,
        feature: Option<&Feature>,
    ) -> Option<Value> {
        let Some(zoom) = globals.zoom else {
            return self.fallback.clone();
        };
        let last = zooms.len() - 1;
        if last == 0 || zoom <= zooms[0] {
            return self.functions[0].evaluate(globals, feature);
        }
        if zoom >= zooms[last] {
            return self.functions[last].evaluate(globals, feature);
        }
        let index = find_stop_less_than_or_equal_to(zooms, zoom);
        let t = interpolation_factor(
            InterpolationType::Linear,
            zoom,
            zooms[index],
            zooms[index + 1],
        );
        let lower = self.functions[index].evaluate(globals, feature)?;
        let upper = self.functions[index + 1].evaluate(globals, feature)?;
        Some(blend(&self.spec, self.color_space, &lower, &upper, t))
    }
}

#[derive(Debug, Clone)]
enum Body {
    Source {
        property: String,
        function: StopFunction,
    },
    Camera(StopFunction),
    Composite(Composite),
}

/// A validated legacy function, ready to evaluate.
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    kind: FunctionKind,
    interpolation_type: Option<InterpolationType>,
    zoom_stops: Vec<f64>,
    body: Body,
}

impl CompiledFunction {
    /// Which inputs the function reads.
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Zoom interpolation curve of camera and composite functions. `None` for source
    /// functions and for camera functions that step rather than blend.
    pub fn interpolation_type(&self) -> Option<InterpolationType> {
        self.interpolation_type
    }

    /// Zoom levels at which the function is defined. Empty for source functions.
    pub fn zoom_stops(&self) -> &[f64] {
        &self.zoom_stops
    }

    /// Factor for `input` between two zoom stops under [`Self::interpolation_type`].
    /// Stepped functions always report `0`.
    pub fn interpolation_factor(&self, input: f64, lower: f64, upper: f64) -> f64 {
        self.interpolation_type
            .map_or(0.0, |kind| interpolation_factor(kind, input, lower, upper))
    }

    /// Whether the output varies with zoom.
    pub fn is_zoom_dependent(&self) -> bool {
        self.kind != FunctionKind::Source
    }

    /// Whether the output varies with feature properties.
    pub fn is_feature_dependent(&self) -> bool {
        self.kind != FunctionKind::Camera
    }

    /// Evaluate at `globals.zoom` for `feature`. `None` when neither the stops nor any
    /// default produce a value.
    pub fn evaluate(&self, globals: &GlobalProperties, feature: Option<&Feature>) -> Option<Value> {
        match &self.body {
            Body::Camera(function) => function.evaluate(globals.zoom.map(Value::Number).as_ref()),
            Body::Source { property, function } => {
                let input = feature
                    .and_then(|f| f.property(property))
                    .map(Value::from_json);
                function.evaluate(input.as_ref())
            }
            Body::Composite(composite) => composite.evaluate(&self.zoom_stops, globals, feature),
        }
    }

    /// Evaluate for every feature in parallel.
    pub fn evaluate_features(
        &self,
        globals: &GlobalProperties,
        features: &[Feature],
    ) -> Vec<Option<Value>> {
        features
            .par_iter()
            .map(|feature| self.evaluate(globals, Some(feature)))
            .collect()
    }
}

/// Validate `parameters` against `spec` and compile them.
///
/// Stops keyed by `{zoom, value}` objects build a composite function, a `property`
/// builds a source function, and anything else a camera function.
#[tracing::instrument(skip_all, fields(property = parameters.property.as_deref(), ty = %spec.ty))]
pub fn create_function(
    parameters: &FunctionParameters,
    spec: &PropertySpec,
) -> Result<CompiledFunction, FunctionError> {
    let composite = parameters.is_zoom_and_feature_dependent();
    let feature_dependent = composite || parameters.property.is_some();
    let zoom_dependent = composite || !feature_dependent;

    let ty = match parameters.kind.as_deref() {
        Some(name) => FunctionType::parse(name)?,
        None if spec.supports_interpolation() => FunctionType::Exponential,
        None => FunctionType::Interval,
    };
    let color_space = match parameters.color_space.as_deref() {
        Some(name) => {
            ColorSpace::parse(name).ok_or_else(|| FunctionError::UnknownColorSpace(name.to_owned()))?
        }
        None => ColorSpace::Rgb,
    };

    let compiled = if composite {
        create_composite(parameters, spec, color_space)?
    } else if zoom_dependent {
        CompiledFunction {
            kind: FunctionKind::Camera,
            interpolation_type: (ty == FunctionType::Exponential).then(|| {
                InterpolationType::Exponential {
                    base: parameters.base.unwrap_or(1.0),
                }
            }),
            zoom_stops: parameters.stops.iter().filter_map(|s| s.0.as_f64()).collect(),
            body: Body::Camera(StopFunction::new(parameters, spec, ty, color_space)?),
        }
    } else {
        CompiledFunction {
            kind: FunctionKind::Source,
            interpolation_type: None,
            zoom_stops: Vec::new(),
            body: Body::Source {
                property: parameters.property.clone().unwrap_or_default(),
                function: StopFunction::new(parameters, spec, ty, color_space)?,
            },
        }
    };

    tracing::debug!(
        kind = compiled.kind.as_str(),
        function_type = ty.as_str(),
        stops = parameters.stops.len(),
        "compiled legacy function"
    );
    Ok(compiled)
}

/// Regroup `{zoom, value}` stops into one feature function per zoom, in first-seen order.
fn create_composite(
    parameters: &FunctionParameters,
    spec: &PropertySpec,
    color_space: ColorSpace,
) -> Result<CompiledFunction, FunctionError> {
    let mut zooms: Vec<f64> = Vec::new();
    let mut groups: Vec<Vec<Stop>> = Vec::new();
    for (index, Stop(key, output)) in parameters.stops.iter().enumerate() {
        let (Some(zoom), Some(value)) = (key.get("zoom").and_then(Json::as_f64), key.get("value"))
        else {
            return Err(FunctionError::MalformedCompositeKey { index });
        };
        let stop = Stop(value.clone(), output.clone());
        match zooms.iter().position(|&z| z == zoom) {
            Some(i) => groups[i].push(stop),
            None => {
                zooms.push(zoom);
                groups.push(vec![stop]);
            }
        }
    }
    if let Some(i) = zooms.windows(2).position(|w| w[1] < w[0]) {
        return Err(FunctionError::UnsortedStops { index: i + 1 });
    }

    let functions = groups
        .into_iter()
        .map(|stops| {
            let inner = FunctionParameters {
                kind: parameters.kind.clone(),
                property: parameters.property.clone(),
                base: None,
                color_space: parameters.color_space.clone(),
                default: parameters.default.clone(),
                stops,
            };
            create_function(&inner, spec)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let fallback = resolve_default(parameters, spec)?
        .or_else(|| spec.default.as_ref().map(Value::from_json));

    Ok(CompiledFunction {
        kind: FunctionKind::Composite,
        interpolation_type: Some(InterpolationType::Linear),
        zoom_stops: zooms,
        body: Body::Composite(Composite {
            functions,
            fallback,
            color_space,
            spec: spec.clone(),
        }),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/function/function.rs"]
mod tests;
