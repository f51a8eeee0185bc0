#![deny(unsafe_code)]
//! Core of the particle field: drifting points on a 2D surface, linked by
//! faint lines whenever two of them come close.
//!
//! Provides the `Point` data model and initializer, the per-frame stepper,
//! the `ParticleField` that owns a point set, the `Animation` start/stop
//! lifecycle, the `DrawSurface` trait, `Palette`/`Rgba` colors, the
//! seedable `Xorshift64` source, and `FieldConfig`.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod palette;
pub mod params;
pub mod point;
pub mod prng;
pub mod scene;
pub mod surface;

pub use animation::{Animation, CancelHandle, FrameOutcome};
pub use color::Rgba;
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::ParticleField;
pub use frame::{Connection, FrameStats};
pub use palette::Palette;
pub use point::Point;
pub use prng::{RandomSource, Xorshift64};
pub use scene::Scene;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
