//! Tuning constants for the particle field and their JSON overrides.
//!
//! The defaults reproduce the reference look: one point per 20 000 px²,
//! drift of at most 0.25 px/frame per axis, radii in [1, 3), links out to
//! an eighth of the short side at no more than 20% opacity.

use crate::color::Rgba;
use crate::error::FieldError;
use crate::palette::Palette;
use crate::params::{param_f64, param_string};
use serde_json::{json, Value};

/// Surface pixels per point.
pub const DEFAULT_DENSITY: f64 = 20_000.0;
/// Maximum absolute velocity per axis, in pixels per frame.
pub const DEFAULT_MAX_SPEED: f64 = 0.25;
/// Smallest point radius (inclusive).
pub const DEFAULT_RADIUS_MIN: f64 = 1.0;
/// Largest point radius (exclusive).
pub const DEFAULT_RADIUS_MAX: f64 = 3.0;
/// `connection_distance = min(width, height) / divisor`.
pub const DEFAULT_CONNECTION_DIVISOR: f64 = 8.0;
/// Opacity of a link between two coincident points.
pub const DEFAULT_MAX_LINK_OPACITY: f64 = 0.2;
/// Stroke width of links, in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
/// Base color of links; alpha is replaced per link.
pub const DEFAULT_LINK_COLOR: Rgba = Rgba::new(139, 92, 246, 1.0);
/// Name of the default point palette.
pub const DEFAULT_PALETTE: &str = "violet";

/// Tunable constants of a particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Surface pixels per point.
    pub density: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Radii are drawn from `[radius_min, radius_max)`.
    pub radius_min: f64,
    pub radius_max: f64,
    /// Divides the shorter surface side to get the connection distance.
    pub connection_divisor: f64,
    /// Link opacity at distance zero.
    pub max_link_opacity: f64,
    pub line_width: f64,
    pub link_color: Rgba,
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            max_speed: DEFAULT_MAX_SPEED,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: DEFAULT_RADIUS_MAX,
            connection_divisor: DEFAULT_CONNECTION_DIVISOR,
            max_link_opacity: DEFAULT_MAX_LINK_OPACITY,
            line_width: DEFAULT_LINE_WIDTH,
            link_color: DEFAULT_LINK_COLOR,
            palette: Palette::violet(),
        }
    }
}

impl FieldConfig {
    /// Builds a config from a JSON override object and validates it.
    ///
    /// Missing keys keep their defaults. `palette` is a built-in palette
    /// name, `link_color` any string accepted by [`Rgba::parse`].
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let palette = Palette::from_name(&param_string(params, "palette", DEFAULT_PALETTE))?;
        let link_color = match params.get("link_color").and_then(Value::as_str) {
            Some(s) => Rgba::parse(s)?,
            None => DEFAULT_LINK_COLOR,
        };
        let config = Self {
            density: param_f64(params, "density", DEFAULT_DENSITY),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            radius_min: param_f64(params, "radius_min", DEFAULT_RADIUS_MIN),
            radius_max: param_f64(params, "radius_max", DEFAULT_RADIUS_MAX),
            connection_divisor: param_f64(params, "connection_divisor", DEFAULT_CONNECTION_DIVISOR),
            max_link_opacity: param_f64(params, "max_link_opacity", DEFAULT_MAX_LINK_OPACITY),
            line_width: param_f64(params, "line_width", DEFAULT_LINE_WIDTH),
            link_color,
            palette,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against its valid range.
    pub fn validate(&self) -> Result<(), FieldError> {
        check(
            "density",
            self.density.is_finite() && self.density > 0.0,
            "must be a positive number",
        )?;
        check(
            "max_speed",
            self.max_speed.is_finite() && self.max_speed >= 0.0,
            "must be a non-negative number",
        )?;
        check(
            "radius_min",
            self.radius_min.is_finite() && self.radius_min > 0.0,
            "must be a positive number",
        )?;
        check(
            "radius_max",
            self.radius_max.is_finite() && self.radius_max >= self.radius_min,
            "must be at least radius_min",
        )?;
        check(
            "connection_divisor",
            self.connection_divisor.is_finite() && self.connection_divisor > 0.0,
            "must be a positive number",
        )?;
        check(
            "max_link_opacity",
            (0.0..=1.0).contains(&self.max_link_opacity),
            "must lie in [0, 1]",
        )?;
        check(
            "line_width",
            self.line_width.is_finite() && self.line_width > 0.0,
            "must be a positive number",
        )
    }

    /// Current values as a JSON object. Custom palettes are reported by their colors.
    pub fn to_json(&self) -> Value {
        json!({
            "density": self.density,
            "max_speed": self.max_speed,
            "radius_min": self.radius_min,
            "radius_max": self.radius_max,
            "connection_divisor": self.connection_divisor,
            "max_link_opacity": self.max_link_opacity,
            "line_width": self.line_width,
            "link_color": self.link_color.to_css(),
            "palette": self.palette.colors().iter().map(|c| c.to_css()).collect::<Vec<_>>(),
        })
    }

    /// Describes every override key: type, default, range, meaning.
    pub fn schema() -> Value {
        json!({
            "density": {
                "type": "number",
                "default": DEFAULT_DENSITY,
                "min": 1.0,
                "description": "Surface pixels per point; point count = floor(w * h / density)"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "description": "Velocity components are drawn from [-max_speed, max_speed)"
            },
            "radius_min": {
                "type": "number",
                "default": DEFAULT_RADIUS_MIN,
                "description": "Smallest point radius in pixels"
            },
            "radius_max": {
                "type": "number",
                "default": DEFAULT_RADIUS_MAX,
                "description": "Largest point radius in pixels (exclusive)"
            },
            "connection_divisor": {
                "type": "number",
                "default": DEFAULT_CONNECTION_DIVISOR,
                "description": "Connection distance = min(w, h) / connection_divisor"
            },
            "max_link_opacity": {
                "type": "number",
                "default": DEFAULT_MAX_LINK_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Link opacity at zero distance, decaying linearly to 0"
            },
            "line_width": {
                "type": "number",
                "default": DEFAULT_LINE_WIDTH,
                "description": "Link stroke width in pixels"
            },
            "link_color": {
                "type": "string",
                "default": DEFAULT_LINK_COLOR.to_css(),
                "description": "Link color; its alpha is replaced by the computed link opacity"
            },
            "palette": {
                "type": "string",
                "default": DEFAULT_PALETTE,
                "enum": Palette::list_names(),
                "description": "Built-in point palette"
            }
        })
    }
}

fn check(name: &str, ok: bool, reason: &str) -> Result<(), FieldError> {
    if ok {
        Ok(())
    } else {
        Err(FieldError::InvalidConfig {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }
}
