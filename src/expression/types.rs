//! Static value types and the two membership predicates used while compiling and evaluating.

use std::fmt;

use crate::values::Value;

/// Static type tag carried by every compiled expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `null`.
    Null,
    /// `number`.
    Number,
    /// `string`.
    String,
    /// `boolean`.
    Boolean,
    /// `color`.
    Color,
    /// `object`.
    Object,
    /// The universal supertype; concrete shape known only at evaluation time.
    Value,
    /// Result type of expressions that always fail.
    Error,
    /// `collator`.
    Collator,
    /// `formatted`.
    Formatted,
    /// `padding`.
    Padding,
    /// `numberArray`.
    NumberArray,
    /// `colorArray`.
    ColorArray,
    /// `resolvedImage`.
    ResolvedImage,
    /// `array<item, len?>`.
    Array {
        /// Item type.
        item: Box<Type>,
        /// Fixed length, if known.
        len: Option<usize>,
    },
}

/// Dynamic shape of a runtime value, independent of the static [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// `null`.
    Null,
    /// `boolean`.
    Boolean,
    /// `number`.
    Number,
    /// `string`.
    String,
    /// Any array.
    Array,
    /// Anything structured that is not an array.
    Object,
}

impl NativeType {
    /// Lower-case name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Types a `value` may hold at runtime.
const VALUE_MEMBER_TYPES: &[Type] = &[
    Type::Null,
    Type::Number,
    Type::String,
    Type::Boolean,
    Type::Color,
    Type::Formatted,
    Type::Object,
    Type::Padding,
    Type::NumberArray,
    Type::ColorArray,
    Type::ResolvedImage,
];

impl Type {
    /// `array<item, len?>`.
    pub fn array(item: Type, len: Option<usize>) -> Self {
        Self::Array {
            item: Box::new(item),
            len,
        }
    }

    /// Kind tag without type parameters.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Color => "color",
            Self::Object => "object",
            Self::Value => "value",
            Self::Error => "error",
            Self::Collator => "collator",
            Self::Formatted => "formatted",
            Self::Padding => "padding",
            Self::NumberArray => "numberArray",
            Self::ColorArray => "colorArray",
            Self::ResolvedImage => "resolvedImage",
            Self::Array { .. } => "array",
        }
    }

    fn same_kind(&self, other: &Type) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array { item, len: Some(n) } => write!(f, "array<{item}, {n}>"),
            Self::Array { item, len: None } if **item == Type::Value => f.write_str("array"),
            Self::Array { item, len: None } => write!(f, "array<{item}>"),
            other => f.write_str(other.kind()),
        }
    }
}

/// Canonical style-spec name of `t`, for error messages.
pub fn type_to_string(t: &Type) -> String {
    t.to_string()
}

/// Whether `candidate` has the kind of one of `allowed`, or is the universal `value` type.
pub fn is_valid_type(candidate: &Type, allowed: &[Type]) -> bool {
    *candidate == Type::Value || allowed.iter().any(|t| t.same_kind(candidate))
}

/// Whether a concrete runtime value has one of the `allowed` dynamic shapes.
pub fn is_valid_native_type(value: &Value, allowed: &[NativeType]) -> bool {
    allowed.contains(&value.native_type())
}

/// `None` if `t` may be used where `expected` is required, otherwise the error message.
pub fn check_subtype(expected: &Type, t: &Type) -> Option<String> {
    if *t == Type::Error {
        return None;
    }
    let ok = match (expected, t) {
        (
            Type::Array {
                item: expected_item,
                len: expected_len,
            },
            Type::Array { item, len },
        ) => {
            let empty_any = *len == Some(0) && **item == Type::Value;
            (empty_any || check_subtype(expected_item, item).is_none())
                && (expected_len.is_none() || expected_len == len)
        }
        (Type::Array { .. }, _) => false,
        (e, other) if e.same_kind(other) => true,
        (Type::Value, Type::Array { .. }) => true,
        (Type::Value, other) => VALUE_MEMBER_TYPES.iter().any(|m| m.same_kind(other)),
        _ => false,
    };
    if ok {
        None
    } else {
        Some(format!("Expected {expected} but found {t} instead."))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/types.rs"]
mod tests;
