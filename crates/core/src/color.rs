//! Semi-transparent colors as used by a 2D canvas context.
//!
//! Channels are 8-bit, alpha is a float in [0, 1], matching the CSS
//! `rgba(r, g, b, a)` notation the browser surface consumes directly.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An 8-bit RGB color with floating-point alpha.
///
/// Serializes as a CSS `rgba(...)` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Creates a color. Alpha is expected in [0, 1].
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with a different alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: clamp_alpha(a),
            ..self
        }
    }

    /// Parses `#rrggbb`, `#rrggbbaa` (with or without `#`) or `rgba(r, g, b, a)` / `rgb(r, g, b)`.
    ///
    /// Returns `FieldError::InvalidColor` for anything else.
    pub fn parse(s: &str) -> Result<Self, FieldError> {
        let s = s.trim();
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
        {
            return parse_functional(body);
        }
        parse_hex(s)
    }

    /// Formats the color as CSS, e.g. `rgba(139, 92, 246, 0.3)`.
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Returns the color as straight (non-premultiplied) RGBA floats in [0, 1].
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            clamp_alpha(self.a) as f32,
        ]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() {
        0.0
    } else {
        a.clamp(0.0, 1.0)
    }
}

fn parse_hex(s: &str) -> Result<Rgba, FieldError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 && hex.len() != 8 {
        return Err(FieldError::InvalidColor(format!(
            "expected 6 or 8 hex digits, got {}",
            hex.len()
        )));
    }
    let channel = |range: std::ops::Range<usize>, name: &str| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .ok_or_else(|| FieldError::InvalidColor(format!("invalid {name} component in {s:?}")))
    };
    let r = channel(0..2, "red")?;
    let g = channel(2..4, "green")?;
    let b = channel(4..6, "blue")?;
    let a = if hex.len() == 8 {
        channel(6..8, "alpha")? as f64 / 255.0
    } else {
        1.0
    };
    Ok(Rgba { r, g, b, a })
}

fn parse_functional(body: &str) -> Result<Rgba, FieldError> {
    let body = body
        .strip_suffix(')')
        .ok_or_else(|| FieldError::InvalidColor(format!("missing ')' in {body:?}")))?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(FieldError::InvalidColor(format!(
            "expected 3 or 4 components, got {}",
            parts.len()
        )));
    }
    let channel = |part: &str| {
        part.parse::<u8>()
            .map_err(|e| FieldError::InvalidColor(format!("invalid channel {part:?}: {e}")))
    };
    let a = match parts.get(3) {
        Some(part) => {
            let a = part
                .parse::<f64>()
                .map_err(|e| FieldError::InvalidColor(format!("invalid alpha {part:?}: {e}")))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(FieldError::InvalidColor(format!("alpha {a} outside [0, 1]")));
            }
            a
        }
        None => 1.0,
    };
    Ok(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}
