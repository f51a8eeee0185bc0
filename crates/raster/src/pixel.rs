//! CPU rasterization of particle frames into an RGBA pixel buffer.
//!
//! Pixels are stored as premultiplied RGBA floats and blended
//! with the source-over operator, the same compositing a 2D canvas uses.
//! Shape edges get analytic coverage (distance to the pixel center), which
//! is enough anti-aliasing for small dots and hairlines.

use glam::DVec2;
use particle_field_core::color::Rgba;
use particle_field_core::surface::DrawSurface;

/// A `DrawSurface` backed by an in-memory pixel buffer.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    /// Premultiplied RGBA per pixel, row-major.
    pixels: Vec<[f32; 4]>,
}

impl PixelSurface {
    /// Creates a transparent surface. Zero dimensions give an empty buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Straight-alpha RGBA8 bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&[r, g, b, a]| {
                if a <= 0.0 {
                    return [0u8; 4];
                }
                [to_byte(r / a), to_byte(g / a), to_byte(b / a), to_byte(a)]
            })
            .collect()
    }

    /// Opaque RGBA8 bytes with the frame composited over `background`.
    ///
    /// The background's own alpha is ignored.
    pub fn to_rgba8_over(&self, background: Rgba) -> Vec<u8> {
        let [br, bg, bb, _] = background.to_f32_array();
        self.pixels
            .iter()
            .flat_map(|&[r, g, b, a]| {
                let keep = 1.0 - a;
                [
                    to_byte(r + br * keep),
                    to_byte(g + bg * keep),
                    to_byte(b + bb * keep),
                    255u8,
                ]
            })
            .collect()
    }

    /// Source-over blends `color` into one pixel with the given coverage.
    fn blend(&mut self, x: i64, y: i64, color: [f32; 4], coverage: f32) {
        if coverage <= 0.0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let alpha = color[3] * coverage.min(1.0);
        let dst = &mut self.pixels[idx];
        let keep = 1.0 - alpha;
        dst[0] = color[0] * alpha + dst[0] * keep;
        dst[1] = color[1] * alpha + dst[1] * keep;
        dst[2] = color[2] * alpha + dst[2] * keep;
        dst[3] = alpha + dst[3] * keep;
    }

    /// Integer pixel range covering `[min, max]`, clipped to `[0, limit)`.
    fn span(min: f64, max: f64, limit: u32) -> std::ops::Range<i64> {
        let lo = (min.floor() as i64).max(0);
        let hi = (max.ceil() as i64 + 1).min(limit as i64);
        lo..hi.max(lo)
    }
}

impl DrawSurface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let rgba = color.to_f32_array();
        let reach = radius + 0.5;
        for y in Self::span(center.y - reach, center.y + reach, self.height) {
            for x in Self::span(center.x - reach, center.x + reach, self.width) {
                let pixel_center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (reach - pixel_center.distance(center)).clamp(0.0, 1.0);
                self.blend(x, y, rgba, coverage as f32);
            }
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        let rgba = color.to_f32_array();
        let reach = width / 2.0 + 0.5;
        let min = from.min(to) - DVec2::splat(reach);
        let max = from.max(to) + DVec2::splat(reach);
        for y in Self::span(min.y, max.y, self.height) {
            for x in Self::span(min.x, max.x, self.width) {
                let pixel_center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = distance_to_segment(pixel_center, from, to);
                let coverage = (reach - d).clamp(0.0, 1.0);
                self.blend(x, y, rgba, coverage as f32);
            }
        }
    }
}

/// Euclidean distance from `p` to the segment `a`–`b`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
