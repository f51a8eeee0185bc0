//! The particle field: a point set bound to a surface size.
//!
//! The field owns the points, the surface dimensions they live in, the
//! configuration and the random source used to (re)populate them.
//! Resizing always discards the current points and generates a new set;
//! there is no interpolation between the old and new layout.

use crate::config::FieldConfig;
use crate::frame::{connection_distance, step_frame, FrameStats};
use crate::point::{init_points, Point};
use crate::prng::{RandomSource, Xorshift64};
use crate::surface::DrawSurface;

/// Points plus the surface dimensions and config they were generated for.
#[derive(Debug, Clone)]
pub struct ParticleField<R: RandomSource = Xorshift64> {
    width: u32,
    height: u32,
    points: Vec<Point>,
    config: FieldConfig,
    rng: R,
}

impl<R: RandomSource> ParticleField<R> {
    /// Creates a field for a `width` × `height` surface and populates it.
    ///
    /// Zero dimensions are allowed and produce an empty field.
    pub fn new(width: u32, height: u32, config: FieldConfig, rng: R) -> Self {
        let mut field = Self {
            width: 0,
            height: 0,
            points: Vec::new(),
            config,
            rng,
        };
        field.resize(width, height);
        field
    }

    /// Adopts new surface dimensions and replaces the point set wholesale.
    ///
    /// Runs even when the dimensions are unchanged: every point, including
    /// its radius and color, is drawn afresh.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.points = init_points(width, height, &self.config, &mut self.rng);
        log::debug!(
            "field resized to {width}x{height}: {} points, connection distance {:.1}",
            self.points.len(),
            self.connection_distance()
        );
    }

    /// Advances every point by one frame and renders the result onto `surface`.
    pub fn step(&mut self, surface: &mut impl DrawSurface) -> FrameStats {
        step_frame(
            &mut self.points,
            self.width,
            self.height,
            &self.config,
            surface,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current link threshold: `min(width, height) / connection_divisor`.
    pub fn connection_distance(&self) -> f64 {
        connection_distance(self.width, self.height, self.config.connection_divisor)
    }
}

impl ParticleField<Xorshift64> {
    /// Creates a field seeded with a [`Xorshift64`] source.
    pub fn seeded(width: u32, height: u32, config: FieldConfig, seed: u64) -> Self {
        Self::new(width, height, config, Xorshift64::new(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn field(width: u32, height: u32) -> ParticleField {
        ParticleField::seeded(width, height, FieldConfig::default(), 42)
    }

    #[test]
    fn new_populates_according_to_area() {
        let f = field(1600, 1000);
        assert_eq!(f.points().len(), 80);
        assert_eq!(f.connection_distance(), 125.0);
        assert_eq!((f.width(), f.height()), (1600, 1000));
    }

    #[test]
    fn zero_area_field_steps_harmlessly() {
        let mut f = field(0, 0);
        let mut surface = RecordingSurface::new(0, 0);
        for _ in 0..3 {
            let stats = f.step(&mut surface);
            assert_eq!(stats, FrameStats::default());
        }
        assert_eq!(surface.mutations(), 3);
    }

    #[test]
    fn zero_area_field_repopulates_after_growing() {
        let mut f = field(0, 1000);
        assert!(f.points().is_empty());
        f.resize(1000, 800);
        assert_eq!(f.points().len(), 40);
    }

    #[test]
    fn resize_replaces_points_wholesale() {
        let mut f = field(1000, 800);
        let before = f.points().to_vec();
        f.resize(1000, 800);
        assert_eq!(f.points().len(), before.len());
        assert_ne!(f.points(), before.as_slice());
    }

    #[test]
    fn resize_changes_count_with_area() {
        let mut f = field(1000, 800);
        f.resize(2000, 800);
        assert_eq!(f.points().len(), 80);
        f.resize(500, 400);
        assert_eq!(f.points().len(), 10);
    }

    #[test]
    fn step_draws_every_point() {
        let mut f = field(1000, 800);
        let mut surface = RecordingSurface::new(1000, 800);
        let stats = f.step(&mut surface);
        assert_eq!(stats.points, 40);
        assert_eq!(surface.circle_count(), 40);
        assert_eq!(surface.line_count(), stats.connections);
    }

    #[test]
    fn link_count_matches_symmetric_connection_lists() {
        let mut f = field(1600, 1000);
        let mut surface = RecordingSurface::new(1600, 1000);
        let stats = f.step(&mut surface);
        let endpoints: usize = f.points().iter().map(|p| p.connections().len()).sum();
        assert_eq!(endpoints, stats.connections * 2);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = field(800, 600);
        let mut b = field(800, 600);
        let mut sa = RecordingSurface::new(800, 600);
        let mut sb = RecordingSurface::new(800, 600);
        for _ in 0..50 {
            a.step(&mut sa);
            b.step(&mut sb);
        }
        assert_eq!(a.points(), b.points());
        assert_eq!(sa.commands(), sb.commands());
    }

    #[test]
    fn points_stay_near_the_surface_over_many_frames() {
        let mut f = field(400, 300);
        let mut surface = RecordingSurface::new(400, 300);
        let max_speed = f.config().max_speed;
        for _ in 0..5000 {
            f.step(&mut surface);
        }
        for p in f.points() {
            assert!(p.position.x >= -max_speed && p.position.x <= 400.0 + max_speed);
            assert!(p.position.y >= -max_speed && p.position.y <= 300.0 + max_speed);
        }
    }
}
