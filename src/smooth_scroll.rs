//! Wheel-driven smooth scrolling.
//!
//! Wheel input moves a target; every frame the real scroll position eases
//! from where the gesture began toward that target. Touch scrolling is left
//! to the browser.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Event, WheelEvent};

use crate::anim::easing::Ease;
use crate::dom::{self, Listener};
use crate::error::SiteError;

const LINE_HEIGHT: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmoothScrollOptions {
    /// Seconds to settle on a new target.
    pub duration: f64,
    pub wheel_multiplier: f64,
    pub ease: Ease,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            wheel_multiplier: 1.0,
            ease: Ease::Expo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroll {
    options: SmoothScrollOptions,
    position: f64,
    from: f64,
    target: f64,
    elapsed: f64,
    animating: bool,
    stopped: bool,
    last_frame: Option<f64>,
}

impl SmoothScroll {
    pub fn new(options: SmoothScrollOptions) -> Self {
        Self {
            options,
            position: 0.0,
            from: 0.0,
            target: 0.0,
            elapsed: 0.0,
            animating: false,
            stopped: false,
            last_frame: None,
        }
    }

    /// Feeds one wheel delta (px). Returns whether the native scroll should
    /// be suppressed; it always is, even while stopped.
    pub fn wheel(&mut self, delta_y: f64, limit: f64) -> bool {
        if self.stopped {
            return true;
        }
        let base = if self.animating { self.target } else { self.position };
        self.target = (base + delta_y * self.options.wheel_multiplier).clamp(0.0, limit.max(0.0));
        self.from = self.position;
        self.elapsed = 0.0;
        self.animating = true;
        true
    }

    /// Per-frame tick. Returns the position to scroll to, if it moved.
    pub fn raf(&mut self, time_ms: f64) -> Option<f64> {
        let dt = self
            .last_frame
            .map(|last| ((time_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_frame = Some(time_ms);

        if self.stopped || !self.animating {
            return None;
        }

        self.elapsed += dt;
        let progress = if self.options.duration > 0.0 {
            (self.elapsed / self.options.duration).min(1.0)
        } else {
            1.0
        };
        if progress >= 1.0 {
            self.position = self.target;
            self.animating = false;
        } else {
            self.position = self.from + (self.target - self.from) * self.options.ease.apply(progress);
        }
        Some(self.position)
    }

    /// Adopts a position the browser scrolled to by itself (keyboard,
    /// scrollbar drag, anchor jumps).
    pub fn sync(&mut self, native_y: f64) {
        if !self.animating {
            self.position = native_y;
            self.target = native_y;
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.animating = false;
        self.target = self.position;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

/// The page's single smooth-scroll instance, shared by cheap clones.
#[derive(Clone)]
pub struct ScrollDriver {
    state: Rc<RefCell<SmoothScroll>>,
}

impl ScrollDriver {
    pub fn new(options: SmoothScrollOptions) -> Self {
        let mut state = SmoothScroll::new(options);
        state.sync(dom::scroll_y());
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Starts intercepting wheel input on the window.
    pub fn attach(&self) -> Result<Listener, SiteError> {
        let window = dom::window()?;
        let state = self.state.clone();
        Listener::blocking(&window, "wheel", move |event: Event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            if wheel.ctrl_key() {
                return; // pinch zoom
            }
            let delta = match wheel.delta_mode() {
                WheelEvent::DOM_DELTA_LINE => wheel.delta_y() * LINE_HEIGHT,
                WheelEvent::DOM_DELTA_PAGE => wheel.delta_y() * dom::viewport_size().1,
                _ => wheel.delta_y(),
            };
            if state.borrow_mut().wheel(delta, dom::scroll_limit()) {
                event.prevent_default();
            }
        })
    }

    pub fn raf(&self, time_ms: f64) {
        let next = self.state.borrow_mut().raf(time_ms);
        match next {
            Some(y) => {
                if let Ok(window) = dom::window() {
                    window.scroll_to_with_x_and_y(0.0, y);
                }
            }
            None => self.state.borrow_mut().sync(dom::scroll_y()),
        }
    }

    /// Runs `f` against the shared state, logging stop/start transitions.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SmoothScroll) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let was_stopped = state.is_stopped();
        let result = f(&mut *state);
        match (was_stopped, state.is_stopped()) {
            (false, true) => debug!("Smooth scroll stopped"),
            (true, false) => debug!("Smooth scroll started"),
            _ => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(scroll: &mut SmoothScroll, from_ms: f64, frames: usize) -> Vec<f64> {
        (0..frames)
            .filter_map(|i| scroll.raf(from_ms + i as f64 * 16.0))
            .collect()
    }

    #[test]
    fn eases_toward_wheel_target() {
        let mut scroll = SmoothScroll::new(SmoothScrollOptions::default());
        scroll.raf(0.0);
        assert!(scroll.wheel(300.0, 10_000.0));

        let positions = run_frames(&mut scroll, 16.0, 100);
        assert!(positions.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(positions.last().copied(), Some(300.0));
        assert!(!scroll.is_animating());
    }

    #[test]
    fn wheel_accumulates_while_moving_and_respects_limits() {
        let mut scroll = SmoothScroll::new(SmoothScrollOptions::default());
        scroll.wheel(300.0, 500.0);
        scroll.wheel(300.0, 500.0);
        assert_eq!(scroll.target(), 500.0);

        let mut back = SmoothScroll::new(SmoothScrollOptions::default());
        back.wheel(-200.0, 500.0);
        assert_eq!(back.target(), 0.0);
    }

    #[test]
    fn stopped_driver_swallows_input_and_holds_still() {
        let mut scroll = SmoothScroll::new(SmoothScrollOptions::default());
        scroll.raf(0.0);
        scroll.wheel(400.0, 10_000.0);
        scroll.raf(16.0);
        scroll.stop();

        let held = scroll.target();
        assert!(scroll.wheel(400.0, 10_000.0));
        assert_eq!(scroll.target(), held);
        assert_eq!(scroll.raf(32.0), None);

        scroll.start();
        scroll.wheel(100.0, 10_000.0);
        assert!(scroll.raf(48.0).is_some());
    }

    #[test]
    fn idle_driver_follows_native_scroll() {
        let mut scroll = SmoothScroll::new(SmoothScrollOptions::default());
        scroll.sync(1_200.0);
        scroll.wheel(100.0, 10_000.0);
        assert_eq!(scroll.target(), 1_300.0);
    }

    #[test]
    fn multiplier_scales_deltas() {
        let options = SmoothScrollOptions {
            wheel_multiplier: 2.0,
            ..SmoothScrollOptions::default()
        };
        let mut scroll = SmoothScroll::new(options);
        scroll.wheel(50.0, 1_000.0);
        assert_eq!(scroll.target(), 100.0);
    }
}
