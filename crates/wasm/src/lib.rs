#![deny(unsafe_code)]
//! WASM bindings: a decorative particle field on an HTML `<canvas>`.
//!
//! ```js
//! const field = new ParticleCanvas(document.getElementById("bg"));
//! field.start();   // sizes to the window, follows resizes, animates
//! field.stop();    // cancels the pending frame and the resize listener
//! ```

pub mod canvas;

use canvas::CanvasSurface;
use particle_field_core::animation::{Animation, FrameOutcome};
use particle_field_core::config::FieldConfig;
use particle_field_core::prng::Xorshift64;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

type SharedAnimation = Rc<RefCell<Animation<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type ResizeListener = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A particle field animating on a canvas element.
#[wasm_bindgen]
pub struct ParticleCanvas {
    animation: SharedAnimation,
    /// Id of the requested-but-not-yet-run animation frame, if any.
    pending: Rc<Cell<Option<i32>>>,
    frame_callback: FrameCallback,
    resize_listener: ResizeListener,
}

#[wasm_bindgen]
impl ParticleCanvas {
    /// Binds a field to `canvas`.
    ///
    /// `params` is an optional JSON object of config overrides (see
    /// `FieldConfig`); `seed` makes the point layout reproducible, otherwise
    /// it is drawn from `Math.random()` and the clock.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        params: Option<String>,
        seed: Option<u32>,
    ) -> Result<ParticleCanvas, JsValue> {
        let config = parse_config(params.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let surface = CanvasSurface::new(canvas)?;
        surface.apply_backdrop_style()?;
        let rng = match seed {
            Some(seed) => Xorshift64::new(seed as u64),
            None => Xorshift64::from_entropy(entropy()),
        };
        Ok(Self {
            animation: Rc::new(RefCell::new(Animation::new(surface, config, rng))),
            pending: Rc::new(Cell::new(None)),
            frame_callback: Rc::new(RefCell::new(None)),
            resize_listener: Rc::new(RefCell::new(None)),
        })
    }

    /// Sizes the field to the window, starts following window resizes and
    /// begins animating. Calling `start` on a running field does nothing.
    pub fn start(&mut self) -> Result<(), JsValue> {
        let window = window()?;
        if self.resize_listener.borrow().is_none() {
            self.fit_to(&window);
            let animation = Rc::clone(&self.animation);
            let listener = Closure::<dyn FnMut()>::new(move || {
                if let Some(window) = web_sys::window() {
                    let (w, h) = viewport_size(&window);
                    animation.borrow_mut().resize(w, h);
                }
            });
            window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
            *self.resize_listener.borrow_mut() = Some(listener);
        }

        self.animation.borrow_mut().start();
        if self.pending.get().is_none() {
            self.install_frame_callback();
            self.request_frame(&window)?;
        }
        Ok(())
    }

    /// Stops animating: no frame callback draws after this returns.
    pub fn stop(&mut self) {
        self.animation.borrow_mut().stop();
        if let Some(window) = web_sys::window() {
            if let Some(id) = self.pending.take() {
                // A failed cancel leaves a stray frame, which ticks a stopped animation: a no-op.
                let _ = window.cancel_animation_frame(id);
            }
            detach_resize_listener(&window, &self.resize_listener);
        }
        self.frame_callback.borrow_mut().take();
    }

    /// Resizes the field to an explicit size (e.g. a container instead of the window).
    pub fn resize(&self, width: u32, height: u32) {
        self.animation.borrow_mut().resize(width, height);
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.animation.borrow().is_running()
    }

    #[wasm_bindgen(getter, js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.animation.borrow().field().points().len()
    }

    #[wasm_bindgen(getter, js_name = connectionDistance)]
    pub fn connection_distance(&self) -> f64 {
        self.animation.borrow().field().connection_distance()
    }

    fn fit_to(&self, window: &Window) {
        let (w, h) = viewport_size(window);
        self.animation.borrow_mut().resize(w, h);
    }

    /// Builds the self-rescheduling frame closure. A frame requests the next
    /// one only after its own tick finished and only if the tick continued.
    fn install_frame_callback(&self) {
        let animation = Rc::clone(&self.animation);
        let pending = Rc::clone(&self.pending);
        let callback = Rc::clone(&self.frame_callback);
        let resize_listener = Rc::clone(&self.resize_listener);
        let closure = Closure::<dyn FnMut()>::new(move || {
            pending.set(None);
            let outcome = animation.borrow_mut().tick();
            if !outcome.should_continue() {
                log::debug!("frame loop ended: {outcome:?}");
                if releases_listener(&outcome) {
                    if let Some(window) = web_sys::window() {
                        detach_resize_listener(&window, &resize_listener);
                    }
                }
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(next) = callback.borrow().as_ref() {
                pending.set(
                    window
                        .request_animation_frame(next.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        });
        *self.frame_callback.borrow_mut() = Some(closure);
    }

    fn request_frame(&self, window: &Window) -> Result<(), JsValue> {
        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.pending.set(Some(id));
        }
        Ok(())
    }
}

impl Drop for ParticleCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Removes the window resize listener, if attached. A later `start`
/// attaches a fresh one.
fn detach_resize_listener(window: &Window, slot: &ResizeListener) {
    if let Some(listener) = slot.borrow_mut().take() {
        let _ = window
            .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
    }
}

/// Whether a loop that ended with `outcome` should drop its resize listener.
/// A lost canvas must not keep receiving resizes.
fn releases_listener(outcome: &FrameOutcome) -> bool {
    matches!(outcome, FrameOutcome::SurfaceLost)
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        to_pixels(dim(window.inner_width())),
        to_pixels(dim(window.inner_height())),
    )
}

fn entropy() -> u64 {
    let random = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    random ^ (js_sys::Date::now() as u64).rotate_left(32)
}

/// Converts a CSS pixel length to a canvas dimension; negative and NaN become 0.
fn to_pixels(len: f64) -> u32 {
    if len.is_nan() {
        return 0;
    }
    len.clamp(0.0, u32::MAX as f64) as u32
}

/// Parses optional JSON config overrides into a validated config.
fn parse_config(params: Option<&str>) -> Result<FieldConfig, String> {
    let Some(text) = params else {
        return Ok(FieldConfig::default());
    };
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("invalid params JSON: {e}"))?;
    FieldConfig::from_json(&value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_pixels_truncates_and_clamps() {
        assert_eq!(to_pixels(1600.7), 1600);
        assert_eq!(to_pixels(-3.0), 0);
        assert_eq!(to_pixels(f64::NAN), 0);
        assert_eq!(to_pixels(1e12), u32::MAX);
    }

    #[test]
    fn parse_config_defaults_without_params() {
        assert_eq!(parse_config(None).unwrap(), FieldConfig::default());
    }

    #[test]
    fn parse_config_applies_overrides() {
        let config = parse_config(Some(r#"{"density": 10000, "palette": "ocean"}"#)).unwrap();
        assert_eq!(config.density, 10_000.0);
    }

    #[test]
    fn parse_config_reports_bad_json_and_bad_values() {
        assert!(parse_config(Some("{")).unwrap_err().contains("JSON"));
        assert!(parse_config(Some(r#"{"density": 0}"#))
            .unwrap_err()
            .contains("density"));
    }

    #[test]
    fn lost_surface_releases_resize_listener() {
        assert!(releases_listener(&FrameOutcome::SurfaceLost));
        assert!(!releases_listener(&FrameOutcome::Stopped));
    }

    #[test]
    fn lost_canvas_ends_loop_and_releases_listener() {
        use particle_field_core::surface::RecordingSurface;

        let mut surface = RecordingSurface::new(100, 100);
        surface.set_available(false);
        let mut animation = Animation::new(surface, FieldConfig::default(), Xorshift64::new(1));
        animation.start();
        let outcome = animation.tick();
        assert!(!outcome.should_continue());
        assert!(releases_listener(&outcome));
    }

    #[test]
    fn backdrop_style_is_click_through_and_faded() {
        assert!(canvas::BACKDROP_STYLE.contains(&("pointer-events", "none")));
        assert!(canvas::BACKDROP_STYLE.contains(&("opacity", "0.3")));
    }
}
