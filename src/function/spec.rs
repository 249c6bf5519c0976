use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::expression::types::Type;
use crate::foundation::error::StyleResult;
use crate::values::{Color, ColorArray, NumberArray, Padding, Value};

/// The `expression` block of a property specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionSpec {
    /// Whether the property may be driven by `interpolate`.
    #[serde(default)]
    pub interpolated: bool,
    /// Inputs the property may depend on, e.g. `zoom`, `feature`.
    #[serde(default)]
    pub parameters: Vec<String>,
}

/// Metadata describing one style property: its value type, default and enum values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Value type name: `number`, `color`, `enum`, `padding`, `array`, ...
    #[serde(rename = "type")]
    pub ty: String,
    /// Default value, in raw style JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
    /// Allowed values of an `enum` property: an object keyed by value, or a list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Json>,
    /// Item type of an `array` property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Fixed length of an `array` property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Expression capabilities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<ExpressionSpec>,
}

impl PropertySpec {
    /// A spec of value type `ty` with nothing else set.
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            ..Self::default()
        }
    }

    /// Set the default.
    pub fn with_default(mut self, default: Json) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark the property as interpolatable.
    pub fn interpolatable(mut self) -> Self {
        self.expression.get_or_insert_with(ExpressionSpec::default).interpolated = true;
        self
    }

    /// Deserialize from style-spec JSON.
    pub fn from_json(json: &Json) -> StyleResult<Self> {
        Ok(serde_json::from_value(json.clone())?)
    }

    /// Whether functions over this property interpolate by default.
    pub fn supports_interpolation(&self) -> bool {
        self.expression.as_ref().is_some_and(|e| e.interpolated)
    }

    /// Static type an expression for this property must produce.
    pub fn expected_type(&self) -> Type {
        match self.ty.as_str() {
            "array" => {
                let item = self
                    .value
                    .as_deref()
                    .map_or(Type::Value, |v| scalar_type(v).unwrap_or(Type::Value));
                Type::array(item, self.length)
            }
            other => scalar_type(other).unwrap_or(Type::Value),
        }
    }

    /// Allowed values of an `enum` property.
    pub fn enum_values(&self) -> Vec<&str> {
        match &self.values {
            Some(Json::Object(map)) => map.keys().map(String::as_str).collect(),
            Some(Json::Array(items)) => items.iter().filter_map(Json::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `key` is an allowed value of this `enum` property.
    pub fn has_enum_value(&self, key: &str) -> bool {
        self.enum_values().contains(&key)
    }

    /// Whether raw values of this type are converted before use.
    pub(crate) fn has_value_parser(&self) -> bool {
        matches!(
            self.ty.as_str(),
            "color" | "padding" | "numberArray" | "colorArray"
        )
    }

    /// Convert a raw value by the property's value type. `None` when the raw value does not
    /// parse; types without a parser pass through unchanged.
    pub(crate) fn parse_value(&self, raw: &Json) -> Option<Value> {
        match self.ty.as_str() {
            "color" => raw.as_str().and_then(Color::parse).map(Value::Color),
            "padding" => Padding::parse(raw).map(Value::Padding),
            "numberArray" => NumberArray::parse(raw).map(Value::NumberArray),
            "colorArray" => ColorArray::parse(raw).map(Value::ColorArray),
            _ => Some(Value::from_json(raw)),
        }
    }

    /// Whether outputs of this property blend between stops.
    pub(crate) fn is_interpolatable(&self) -> bool {
        matches!(
            self.ty.as_str(),
            "number" | "color" | "padding" | "numberArray" | "colorArray" | "array"
        )
    }
}

fn scalar_type(name: &str) -> Option<Type> {
    Some(match name {
        "color" => Type::Color,
        "string" | "enum" => Type::String,
        "number" => Type::Number,
        "boolean" => Type::Boolean,
        "formatted" => Type::Formatted,
        "padding" => Type::Padding,
        "numberArray" => Type::NumberArray,
        "colorArray" => Type::ColorArray,
        "resolvedImage" => Type::ResolvedImage,
        _ => return None,
    })
}

/// One `[input, output]` pair of a legacy function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop(pub Json, pub Json);

/// A legacy function definition as written in a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionParameters {
    /// `exponential`, `interval`, `categorical` or `identity`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Feature property used as input; absent for zoom-only functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Exponential base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    /// Color blending space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    /// Fallback output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
    /// Stop table.
    #[serde(default)]
    pub stops: Vec<Stop>,
}

impl FunctionParameters {
    /// Deserialize from style-spec JSON.
    pub fn from_json(json: &Json) -> StyleResult<Self> {
        Ok(serde_json::from_value(json.clone())?)
    }

    /// Whether stop inputs are `{zoom, value}` objects.
    pub fn is_zoom_and_feature_dependent(&self) -> bool {
        self.stops.first().is_some_and(|s| s.0.is_object())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/function/spec.rs"]
mod tests;
