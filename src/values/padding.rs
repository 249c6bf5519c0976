use serde_json::Value as Json;

/// Four-sided padding in CSS order `[top, right, bottom, left]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    /// `[top, right, bottom, left]`.
    pub values: [f64; 4],
}

impl Padding {
    /// Build from explicit sides.
    pub fn new(values: [f64; 4]) -> Self {
        Self { values }
    }

    /// Parse a number or an array of 1 to 4 numbers using CSS shorthand expansion.
    pub fn parse(input: &Json) -> Option<Self> {
        if let Some(n) = input.as_f64() {
            return Some(Self::new([n; 4]));
        }
        let items = input.as_array()?;
        let nums = items.iter().map(Json::as_f64).collect::<Option<Vec<_>>>()?;
        Self::from_shorthand(&nums)
    }

    pub(crate) fn from_shorthand(nums: &[f64]) -> Option<Self> {
        let values = match *nums {
            [all] => [all; 4],
            [v, h] => [v, h, v, h],
            [t, h, b] => [t, h, b, h],
            [t, r, b, l] => [t, r, b, l],
            _ => return None,
        };
        Some(Self::new(values))
    }
}
