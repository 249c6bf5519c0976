use serde_json::Value as Json;

use crate::values::color::Color;

/// A variable-length list of numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberArray {
    /// The numbers.
    pub values: Vec<f64>,
}

impl NumberArray {
    /// Parse a single number or an array of numbers.
    pub fn parse(input: &Json) -> Option<Self> {
        if let Some(n) = input.as_f64() {
            return Some(Self { values: vec![n] });
        }
        let values = input
            .as_array()?
            .iter()
            .map(Json::as_f64)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { values })
    }
}

/// A variable-length list of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorArray {
    /// The colors.
    pub values: Vec<Color>,
}

impl ColorArray {
    /// Parse a single color string or an array of color strings.
    pub fn parse(input: &Json) -> Option<Self> {
        if let Some(s) = input.as_str() {
            return Color::parse(s).map(|c| Self { values: vec![c] });
        }
        let values = input
            .as_array()?
            .iter()
            .map(|v| v.as_str().and_then(Color::parse))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { values })
    }
}
