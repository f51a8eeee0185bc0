//! Points of the field and the initializer that populates a surface.

use crate::color::Rgba;
use crate::config::FieldConfig;
use crate::prng::RandomSource;
use glam::DVec2;

/// One particle of the field.
///
/// `radius` and `color` are fixed at creation. `position` and `velocity`
/// change every frame; `connections` holds the indices of the points
/// linked to this one during the most recent frame only.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: DVec2,
    pub velocity: DVec2,
    radius: f64,
    color: Rgba,
    pub(crate) connections: Vec<usize>,
}

impl Point {
    /// Creates a point with no connections.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            connections: Vec::new(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Indices of the points within connection distance during the last frame.
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }
}

/// Number of points for a surface: `floor(width * height / density)`.
///
/// A zero-area surface yields zero points.
pub fn point_count(width: u32, height: u32, density: f64) -> usize {
    let area = width as f64 * height as f64;
    (area / density).floor() as usize
}

/// Generates a fresh point set for a `width` × `height` surface.
///
/// Positions are uniform in [0, width) × [0, height), velocity components
/// uniform in [-max_speed, max_speed), radii uniform in
/// [radius_min, radius_max), colors uniform over the palette.
pub fn init_points(
    width: u32,
    height: u32,
    config: &FieldConfig,
    rng: &mut impl RandomSource,
) -> Vec<Point> {
    let count = point_count(width, height, config.density);
    let (w, h) = (width as f64, height as f64);
    let speed = config.max_speed;

    (0..count)
        .map(|_| {
            let position = DVec2::new(rng.next_f64() * w, rng.next_f64() * h);
            let velocity = DVec2::new(
                rng.next_range(-speed, speed),
                rng.next_range(-speed, speed),
            );
            let radius = rng.next_range(config.radius_min, config.radius_max);
            let color = config.palette.pick(rng);
            Point::new(position, velocity, radius, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Xorshift64;

    fn points(width: u32, height: u32, seed: u64) -> Vec<Point> {
        init_points(width, height, &FieldConfig::default(), &mut Xorshift64::new(seed))
    }

    #[test]
    fn count_for_1000_by_800_is_40() {
        assert_eq!(point_count(1000, 800, 20_000.0), 40);
        assert_eq!(points(1000, 800, 1).len(), 40);
    }

    #[test]
    fn count_for_1600_by_1000_is_80() {
        assert_eq!(points(1600, 1000, 1).len(), 80);
    }

    #[test]
    fn count_floors_partial_points() {
        // 199 * 100 = 19_900 px², just short of one point.
        assert_eq!(point_count(199, 100, 20_000.0), 0);
        assert_eq!(point_count(200, 100, 20_000.0), 1);
        assert_eq!(point_count(300, 100, 20_000.0), 1);
    }

    #[test]
    fn zero_area_produces_no_points() {
        assert!(points(0, 800, 1).is_empty());
        assert!(points(800, 0, 1).is_empty());
        assert!(points(0, 0, 1).is_empty());
    }

    #[test]
    fn large_surface_does_not_overflow() {
        assert_eq!(point_count(u32::MAX, 2, 20_000.0), (u32::MAX as usize * 2) / 20_000);
    }

    #[test]
    fn attributes_fall_in_reference_ranges() {
        let palette = crate::palette::Palette::violet();
        for p in points(1920, 1080, 7) {
            assert!(p.velocity.x >= -0.25 && p.velocity.x < 0.25);
            assert!(p.velocity.y >= -0.25 && p.velocity.y < 0.25);
            assert!(p.radius() >= 1.0 && p.radius() < 3.0);
            assert!(palette.colors().contains(&p.color()));
            assert!(p.connections().is_empty());
        }
    }

    #[test]
    fn same_seed_reproduces_the_point_set() {
        assert_eq!(points(800, 600, 99), points(800, 600, 99));
        assert_ne!(points(800, 600, 1), points(800, 600, 2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn initial_positions_lie_inside_the_surface(
                seed: u64,
                width in 0u32..3000,
                height in 0u32..3000,
            ) {
                for p in points(width, height, seed) {
                    prop_assert!(p.position.x >= 0.0 && p.position.x < width as f64);
                    prop_assert!(p.position.y >= 0.0 && p.position.y < height as f64);
                }
            }

            #[test]
            fn count_matches_area_formula(width in 0u32..4000, height in 0u32..4000) {
                let expected = (width as u64 * height as u64 / 20_000) as usize;
                prop_assert_eq!(points(width, height, 1).len(), expected);
            }
        }
    }
}
