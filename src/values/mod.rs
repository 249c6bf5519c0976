//! Runtime values produced by expression evaluation and legacy functions.

pub(crate) mod arrays;
pub(crate) mod color;
pub(crate) mod padding;
pub(crate) mod text;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as Json;

use crate::expression::collator::Collator;
use crate::expression::types::{NativeType, Type};

pub use arrays::{ColorArray, NumberArray};
pub use color::Color;
pub use padding::Padding;
pub use text::{Formatted, FormattedSection, ResolvedImage};

/// Tagged union over everything an expression can evaluate to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// Boolean.
    Boolean(bool),
    /// Number (always `f64`).
    Number(f64),
    /// String.
    String(String),
    /// Parsed color.
    Color(Color),
    /// Locale-aware string comparator.
    Collator(Collator),
    /// Rich text.
    Formatted(Formatted),
    /// Sprite image reference.
    ResolvedImage(ResolvedImage),
    /// Four-sided padding.
    Padding(Padding),
    /// List of numbers.
    NumberArray(NumberArray),
    /// List of colors.
    ColorArray(ColorArray),
    /// Heterogeneous array.
    Array(Vec<Value>),
    /// String-keyed object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Convert an untyped JSON value. Strings stay strings; no color sniffing happens here.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Boolean(*b),
            Json::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Self::String(s.clone()),
            Json::Array(items) => Self::Array(items.iter().map(Self::from_json).collect()),
            Json::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render as JSON for output. Colors render as `rgba(...)` strings.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Boolean(b) => Json::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => Json::String(s.clone()),
            Self::Color(c) => Json::String(c.to_string()),
            Self::Collator(c) => serde_json::json!({
                "locale": c.locale(),
                "sensitivity": c.sensitivity().as_str(),
            }),
            Self::Formatted(f) => Json::String(f.to_string()),
            Self::ResolvedImage(i) => Json::String(i.name.clone()),
            Self::Padding(p) => Json::Array(p.values.iter().map(|v| number_to_json(*v)).collect()),
            Self::NumberArray(a) => Json::Array(a.values.iter().map(|v| number_to_json(*v)).collect()),
            Self::ColorArray(a) => Json::Array(
                a.values
                    .iter()
                    .map(|c| Json::String(c.to_string()))
                    .collect(),
            ),
            Self::Array(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Dynamic shape of the value as the host data model sees it.
    pub fn native_type(&self) -> NativeType {
        match self {
            Self::Null => NativeType::Null,
            Self::Boolean(_) => NativeType::Boolean,
            Self::Number(_) => NativeType::Number,
            Self::String(_) => NativeType::String,
            Self::Array(_) => NativeType::Array,
            _ => NativeType::Object,
        }
    }

    /// Static type of a concrete value. Arrays get a common item type when all items agree.
    pub fn type_of(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Boolean(_) => Type::Boolean,
            Self::Number(_) => Type::Number,
            Self::String(_) => Type::String,
            Self::Color(_) => Type::Color,
            Self::Collator(_) => Type::Collator,
            Self::Formatted(_) => Type::Formatted,
            Self::ResolvedImage(_) => Type::ResolvedImage,
            Self::Padding(_) => Type::Padding,
            Self::NumberArray(_) => Type::NumberArray,
            Self::ColorArray(_) => Type::ColorArray,
            Self::Object(_) => Type::Object,
            Self::Array(items) => {
                let mut item_type: Option<Type> = None;
                for item in items {
                    let t = item.type_of();
                    match &item_type {
                        None => item_type = Some(t),
                        Some(existing) if *existing == t => {}
                        Some(_) => {
                            item_type = Some(Type::Value);
                            break;
                        }
                    }
                }
                Type::array(item_type.unwrap_or(Type::Value), Some(items.len()))
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Color(c) => write!(f, "{c}"),
            Self::Formatted(t) => write!(f, "{t}"),
            Self::ResolvedImage(i) => write!(f, "{i}"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

fn number_to_json(n: f64) -> Json {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Json::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Json::Number)
            .unwrap_or(Json::Null)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/value.rs"]
mod tests;
