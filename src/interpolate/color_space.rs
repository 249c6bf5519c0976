use serde::{Deserialize, Serialize};

use crate::values::Color;

/// Space in which colors are blended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Premultiplied RGB, component-wise.
    #[default]
    Rgb,
    /// CIE hue/chroma/luminance; hue takes the shorter arc.
    Hcl,
    /// CIE Lab, component-wise.
    Lab,
}

impl ColorSpace {
    /// `"rgb"`, `"hcl"` or `"lab"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "rgb" => Some(Self::Rgb),
            "hcl" => Some(Self::Hcl),
            "lab" => Some(Self::Lab),
            _ => None,
        }
    }

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hcl => "hcl",
            Self::Lab => "lab",
        }
    }

    /// Blend `from` toward `to` by `t`.
    pub fn interpolate(self, from: &Color, to: &Color, t: f64) -> Color {
        match self {
            Self::Rgb => Color::new(
                lerp(from.r, to.r, t),
                lerp(from.g, to.g, t),
                lerp(from.b, to.b, t),
                lerp(from.a, to.a, t),
            ),
            Self::Lab => {
                let a = from.to_lab();
                let b = to.to_lab();
                Color::from_lab(std::array::from_fn(|i| lerp(a[i], b[i], t)))
            }
            Self::Hcl => {
                let [h0, c0, l0, a0] = from.to_hcl();
                let [h1, c1, l1, a1] = to.to_hcl();
                Color::from_hcl([
                    interpolate_hue(h0, h1, t),
                    lerp(c0, c1, t),
                    lerp(l0, l1, t),
                    lerp(a0, a1, t),
                ])
            }
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Achromatic ends (NaN hue) borrow the other end's hue.
fn interpolate_hue(h0: f64, h1: f64, t: f64) -> f64 {
    match (h0.is_nan(), h1.is_nan()) {
        (false, false) => {
            let mut dh = h1 - h0;
            if dh > 180.0 {
                dh -= 360.0;
            } else if dh < -180.0 {
                dh += 360.0;
            }
            h0 + dh * t
        }
        (false, true) => h0,
        (true, false) => h1,
        (true, true) => f64::NAN,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interpolate/color_space.rs"]
mod tests;
