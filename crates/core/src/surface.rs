//! The drawable surface a field renders into.
//!
//! [`DrawSurface`] is the only thing the frame stepper knows about its
//! output: a resizable 2D area that can be cleared and accept filled
//! circles and stroked lines. The browser canvas, the CPU rasterizer and
//! the [`RecordingSurface`] below all implement it.

use crate::color::Rgba;
use glam::DVec2;

/// A resizable 2D drawing target.
pub trait DrawSurface {
    /// Current width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Resizes the drawable area. Existing content may be discarded.
    fn set_size(&mut self, width: u32, height: u32);

    /// Whether the surface can still be drawn to.
    ///
    /// A surface that has been torn down (e.g. a canvas removed from the
    /// document) returns `false`; the animation then stops instead of drawing.
    fn is_available(&self) -> bool {
        true
    }

    /// Erases the whole surface to transparent.
    fn clear(&mut self);

    /// Fills a circle of `radius` around `center`.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Strokes a straight segment of the given `width`.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        (**self).set_size(width, height)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        (**self).fill_circle(center, radius, color)
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        (**self).stroke_line(from, to, width, color)
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Rgba,
    },
}

/// A surface that records draw calls instead of rasterizing them.
///
/// Keeps the commands issued since the last `clear` (i.e. the current
/// frame) and a running count of every mutating call, which makes it
/// usable as a headless stand-in for a canvas.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    available: bool,
    commands: Vec<DrawCommand>,
    mutations: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            available: true,
            commands: Vec::new(),
            mutations: 0,
        }
    }

    /// Commands of the current frame, starting with its `Clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total number of clear, circle and line calls ever received.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Simulates the surface being torn down (or restored).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Number of circles drawn in the current frame.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Number of lines drawn in the current frame.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn clear(&mut self) {
        self.mutations += 1;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.mutations += 1;
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.mutations += 1;
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
