//! Interpolation math shared by the `interpolate` operators and legacy stop functions.

pub(crate) mod color_space;
pub(crate) mod stops;

use crate::expression::types::Type;
use crate::values::{Color, ColorArray, NumberArray, Padding, Value};

pub use color_space::ColorSpace;
pub use stops::find_stop_less_than_or_equal_to;

/// Curve used to place an input between two stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolationType {
    /// Straight-line ratio.
    Linear,
    /// `base^x` curve; `base == 1` is linear.
    Exponential {
        /// Growth rate.
        base: f64,
    },
}

impl InterpolationType {
    /// Exponential base of the curve (`1` for linear).
    pub fn base(self) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Exponential { base } => base,
        }
    }
}

/// Normalized position of `input` between `lower` and `upper` under `kind`.
pub fn interpolation_factor(kind: InterpolationType, input: f64, lower: f64, upper: f64) -> f64 {
    exponential_interpolation(input, kind.base(), lower, upper)
}

/// Position of `input` on the shifted exponential through `(lower, 0)` and `(upper, 1)`.
///
/// `0` when the stops coincide, the linear ratio when `base == 1`.
pub fn exponential_interpolation(input: f64, base: f64, lower: f64, upper: f64) -> f64 {
    let difference = upper - lower;
    let progress = input - lower;
    if difference == 0.0 {
        0.0
    } else if base == 1.0 {
        progress / difference
    } else {
        (base.powf(progress) - 1.0) / (base.powf(difference) - 1.0)
    }
}

/// Values that blend linearly by a normalized factor.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        ColorSpace::Rgb.interpolate(a, b, t)
    }
}

impl Lerp for Padding {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Padding::new(std::array::from_fn(|i| f64::lerp(&a.values[i], &b.values[i], t)))
    }
}

impl Lerp for NumberArray {
    // Lists of different lengths do not blend.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if a.values.len() != b.values.len() {
            return a.clone();
        }
        NumberArray {
            values: a
                .values
                .iter()
                .zip(&b.values)
                .map(|(x, y)| f64::lerp(x, y, t))
                .collect(),
        }
    }
}

impl Lerp for ColorArray {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if a.values.len() != b.values.len() {
            return a.clone();
        }
        ColorArray {
            values: a
                .values
                .iter()
                .zip(&b.values)
                .map(|(x, y)| Color::lerp(x, y, t))
                .collect(),
        }
    }
}

/// Blend two values of the same interpolatable shape; anything else holds `a`.
pub fn interpolate_value(a: &Value, b: &Value, t: f64, space: ColorSpace) -> Value {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Value::Number(f64::lerp(x, y, t)),
        (Value::Color(x), Value::Color(y)) => Value::Color(space.interpolate(x, y, t)),
        (Value::Padding(x), Value::Padding(y)) => Value::Padding(Padding::lerp(x, y, t)),
        (Value::NumberArray(x), Value::NumberArray(y)) => {
            Value::NumberArray(NumberArray::lerp(x, y, t))
        }
        (Value::ColorArray(x), Value::ColorArray(y)) if x.values.len() == y.values.len() => {
            Value::ColorArray(ColorArray {
                values: x
                    .values
                    .iter()
                    .zip(&y.values)
                    .map(|(c0, c1)| space.interpolate(c0, c1, t))
                    .collect(),
            })
        }
        (Value::Array(xs), Value::Array(ys)) if xs.len() == ys.len() => {
            let blended: Option<Vec<Value>> = xs
                .iter()
                .zip(ys)
                .map(|(x, y)| match (x, y) {
                    (Value::Number(x), Value::Number(y)) => Some(Value::Number(f64::lerp(x, y, t))),
                    _ => None,
                })
                .collect();
            blended.map_or_else(|| a.clone(), Value::Array)
        }
        _ => a.clone(),
    }
}

/// Whether values of static type `ty` blend under [`interpolate_value`].
pub(crate) fn is_interpolatable(ty: &Type) -> bool {
    match ty {
        Type::Number | Type::Color | Type::Padding | Type::NumberArray | Type::ColorArray => true,
        Type::Array { item, .. } => **item == Type::Number,
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interpolate/factor.rs"]
mod tests;
