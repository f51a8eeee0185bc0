//! Reproducible description of a headless render.
//!
//! A [`Scene`] captures everything needed to re-render the same frame:
//! surface size, PRNG seed, number of frames to advance, and config
//! overrides. Same scene, same pixels.

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use serde::{Deserialize, Serialize};

fn default_frames() -> usize {
    1
}

fn default_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Overrides passed to [`FieldConfig::from_json`].
    #[serde(default = "default_params")]
    pub params: serde_json::Value,
}

impl Scene {
    /// Creates a scene that renders a single frame with default config.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            frames: default_frames(),
            params: default_params(),
        }
    }

    /// Checks that the scene can be rasterized: non-zero dimensions whose
    /// pixel count fits in a `u32`, and valid params.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FieldError::InvalidDimensions)?;
        FieldConfig::from_json(&self.params).map(|_| ())
    }

    /// Parses the overrides into a config.
    pub fn config(&self) -> Result<FieldConfig, FieldError> {
        FieldConfig::from_json(&self.params)
    }

    /// Builds the field this scene describes, before any frame is stepped.
    pub fn field(&self) -> Result<ParticleField, FieldError> {
        self.validate()?;
        Ok(ParticleField::seeded(
            self.width,
            self.height,
            self.config()?,
            self.seed,
        ))
    }
}
