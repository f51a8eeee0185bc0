#![deny(unsafe_code)]
//! Headless rendering of particle fields.
//!
//! Sits between `particle-field-core` (which knows nothing about pixels)
//! and the CLI: [`PixelSurface`] rasterizes frames on the CPU and
//! [`render_scene`] replays a [`Scene`] onto one.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::PixelSurface;

use particle_field_core::animation::{Animation, FrameOutcome};
use particle_field_core::error::FieldError;
use particle_field_core::frame::FrameStats;
use particle_field_core::prng::Xorshift64;
use particle_field_core::scene::Scene;

/// Runs `scene.frames` frames on a fresh [`PixelSurface`] and returns the
/// surface holding the last frame, with that frame's stats.
///
/// Returns an error if the scene has zero or overflowing dimensions, or
/// invalid params.
pub fn render_scene(scene: &Scene) -> Result<(PixelSurface, FrameStats), FieldError> {
    scene.validate()?;
    let surface = PixelSurface::new(scene.width, scene.height);
    let mut animation = Animation::new(surface, scene.config()?, Xorshift64::new(scene.seed));
    animation.start();
    let stats = match animation.run(scene.frames) {
        FrameOutcome::Continue(stats) => stats,
        // A pixel surface never goes away; an idle outcome only means zero frames.
        FrameOutcome::Stopped | FrameOutcome::SurfaceLost => FrameStats::default(),
    };
    log::debug!(
        "rendered {} frames of {}x{} (seed {}): {} points, {} links",
        scene.frames,
        scene.width,
        scene.height,
        scene.seed,
        stats.points,
        stats.connections
    );
    Ok((animation.into_surface(), stats))
}
