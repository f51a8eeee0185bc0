//! Start/stop lifecycle around a particle field and its surface.
//!
//! The host owns the actual frame scheduling (`requestAnimationFrame`, a
//! render loop, a test harness). Each scheduled callback calls
//! [`Animation::tick`] and requests another frame only when the outcome is
//! [`FrameOutcome::Continue`]. One tick runs to completion before the next
//! is requested, so a frame never overlaps another or a resize.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::frame::FrameStats;
use crate::prng::{RandomSource, Xorshift64};
use crate::surface::DrawSurface;
use std::cell::Cell;
use std::rc::Rc;

/// Result of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was rendered; the host should schedule the next one.
    Continue(FrameStats),
    /// The animation is not running (never started or cancelled). Nothing was drawn.
    Stopped,
    /// The surface is gone. Nothing was drawn and the animation has stopped.
    SurfaceLost,
}

impl FrameOutcome {
    /// Whether the host should request another frame.
    pub fn should_continue(&self) -> bool {
        matches!(self, FrameOutcome::Continue(_))
    }
}

/// Shared cancellation flag for one run of an animation.
///
/// Clones refer to the same flag. Once cancelled, a handle stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    fn new() -> Self {
        Self::default()
    }

    /// Stops the run this handle was issued for. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// A particle field bound to a drawing surface, with an explicit lifecycle.
pub struct Animation<S: DrawSurface, R: RandomSource = Xorshift64> {
    field: ParticleField<R>,
    surface: S,
    run: Option<CancelHandle>,
    frames: u64,
}

impl<S: DrawSurface, R: RandomSource> Animation<S, R> {
    /// Binds a new field to `surface`, sized to the surface's current dimensions.
    ///
    /// The animation starts idle; call [`start`](Self::start) before ticking.
    pub fn new(surface: S, config: FieldConfig, rng: R) -> Self {
        let (width, height) = surface.size();
        Self {
            field: ParticleField::new(width, height, config, rng),
            surface,
            run: None,
            frames: 0,
        }
    }

    /// Starts (or restarts) the animation and returns its cancel handle.
    ///
    /// Calling `start` while already running returns the existing handle,
    /// so at most one loop is ever live. After a stop, a fresh handle is
    /// issued; handles from earlier runs stay cancelled.
    pub fn start(&mut self) -> CancelHandle {
        if let Some(run) = self.run.as_ref().filter(|run| !run.is_cancelled()) {
            return run.clone();
        }
        let run = CancelHandle::new();
        self.run = Some(run.clone());
        log::debug!(
            "animation started on {}x{} surface",
            self.field.width(),
            self.field.height()
        );
        run
    }

    /// Stops the animation. Later ticks draw nothing.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel();
            log::debug!("animation stopped after {} frames", self.frames);
        }
    }

    /// Whether a started run has not been cancelled.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.is_cancelled())
    }

    /// One scheduled frame: steps and renders the field if the animation is live.
    pub fn tick(&mut self) -> FrameOutcome {
        if !self.is_running() {
            return FrameOutcome::Stopped;
        }
        if !self.surface.is_available() {
            log::warn!("drawing surface unavailable; stopping animation");
            self.stop();
            return FrameOutcome::SurfaceLost;
        }
        let stats = self.field.step(&mut self.surface);
        self.frames += 1;
        FrameOutcome::Continue(stats)
    }

    /// Resizes the surface and regenerates the field for the new area.
    ///
    /// Leaves the run state untouched: resizing never starts, stops or
    /// duplicates a loop.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.field.resize(width, height);
    }

    /// Ticks up to `frames` times, stopping early if a tick does not continue.
    ///
    /// Returns the last outcome (`Stopped` when `frames` is 0 and the
    /// animation is idle, the last `Continue` otherwise).
    pub fn run(&mut self, frames: usize) -> FrameOutcome {
        let mut outcome = if self.is_running() {
            FrameOutcome::Continue(FrameStats::default())
        } else {
            FrameOutcome::Stopped
        };
        for _ in 0..frames {
            outcome = self.tick();
            if !outcome.should_continue() {
                break;
            }
        }
        outcome
    }

    /// Frames rendered since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Releases the surface, e.g. to export the last frame.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn animation(width: u32, height: u32) -> Animation<RecordingSurface> {
        Animation::new(
            RecordingSurface::new(width, height),
            FieldConfig::default(),
            Xorshift64::new(42),
        )
    }

    #[test]
    fn new_sizes_field_from_surface() {
        let a = animation(1600, 1000);
        assert_eq!(a.field().points().len(), 80);
        assert!(!a.is_running());
    }

    #[test]
    fn tick_before_start_draws_nothing() {
        let mut a = animation(1000, 800);
        assert_eq!(a.tick(), FrameOutcome::Stopped);
        assert_eq!(a.surface().mutations(), 0);
    }

    #[test]
    fn tick_while_running_renders_a_frame() {
        let mut a = animation(1000, 800);
        a.start();
        let outcome = a.tick();
        assert!(outcome.should_continue());
        assert_eq!(a.surface().circle_count(), 40);
        assert_eq!(a.frames(), 1);
    }

    #[test]
    fn cancel_handle_stops_all_further_drawing() {
        let mut a = animation(1000, 800);
        let handle = a.start();
        a.run(5);
        let before = a.surface().mutations();
        assert!(before > 0);

        handle.cancel();
        for _ in 0..10 {
            assert_eq!(a.tick(), FrameOutcome::Stopped);
        }
        assert_eq!(a.surface().mutations(), before);
        assert!(!a.is_running());
    }

    #[test]
    fn stop_invalidates_previously_issued_handles() {
        let mut a = animation(1000, 800);
        let first = a.start();
        a.stop();
        assert!(first.is_cancelled());

        let second = a.start();
        assert!(!second.is_cancelled());
        assert!(first.is_cancelled());
        assert!(a.tick().should_continue());
    }

    #[test]
    fn start_twice_reuses_the_live_run() {
        let mut a = animation(1000, 800);
        let first = a.start();
        let second = a.start();
        second.cancel();
        assert!(first.is_cancelled());
        assert_eq!(a.tick(), FrameOutcome::Stopped);
    }

    #[test]
    fn lost_surface_stops_the_loop_without_drawing() {
        let mut a = animation(1000, 800);
        let handle = a.start();
        a.tick();
        let before = a.surface().mutations();

        a.surface_mut().set_available(false);
        assert_eq!(a.tick(), FrameOutcome::SurfaceLost);
        assert!(handle.is_cancelled());

        a.surface_mut().set_available(true);
        assert_eq!(a.tick(), FrameOutcome::Stopped);
        assert_eq!(a.surface().mutations(), before);
    }

    #[test]
    fn resize_with_same_dimensions_keeps_a_single_loop() {
        let mut a = animation(1000, 800);
        a.start();
        a.tick();
        let per_frame = a.surface().commands().len();
        let mutations = a.surface().mutations();

        a.resize(1000, 800);
        assert!(a.is_running());
        assert_eq!(a.field().points().len(), 40);

        assert!(a.tick().should_continue());
        // One clear and 40 circles per frame, plus however many links.
        assert_eq!(a.surface().circle_count(), 40);
        let clears = a
            .surface()
            .commands()
            .iter()
            .filter(|c| matches!(c, crate::surface::DrawCommand::Clear))
            .count();
        assert_eq!(clears, 1);
        assert!(a.surface().mutations() > mutations);
        assert!(per_frame >= 41);
    }

    #[test]
    fn resize_updates_surface_and_field() {
        let mut a = animation(1000, 800);
        a.resize(1600, 1000);
        assert_eq!(a.surface().size(), (1600, 1000));
        assert_eq!(a.field().points().len(), 80);
        assert_eq!(a.field().connection_distance(), 125.0);
    }

    #[test]
    fn resize_to_zero_then_back() {
        let mut a = animation(1000, 800);
        a.start();
        a.resize(0, 0);
        assert_eq!(a.tick(), FrameOutcome::Continue(FrameStats::default()));
        a.resize(1000, 800);
        match a.tick() {
            FrameOutcome::Continue(stats) => assert_eq!(stats.points, 40),
            other => panic!("expected a rendered frame, got {other:?}"),
        }
    }

    #[test]
    fn run_stops_early_when_cancelled_or_idle() {
        let mut a = animation(400, 400);
        assert_eq!(a.run(10), FrameOutcome::Stopped);
        assert_eq!(a.frames(), 0);

        a.start();
        assert!(a.run(10).should_continue());
        assert_eq!(a.frames(), 10);
    }
}
