//! Frame scheduling and the marching-ants outline.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::layout::AxisModel;

/// Handle of one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// Something that calls back once per display frame.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameId>;

    /// Cancel a requested frame. Cancelling a frame that already ran or was
    /// already cancelled is a no-op.
    fn cancel_frame(&mut self, id: FrameId);
}

#[derive(Debug, Default)]
struct ManualFrames {
    next: i32,
    pending: Vec<FrameId>,
    cancelled: Vec<FrameId>,
}

/// A scheduler driven by hand: frames only "run" when the caller takes
/// them. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    frames: Rc<RefCell<ManualFrames>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the oldest pending frame, as if it fired.
    pub fn fire(&self) -> Option<FrameId> {
        let mut frames = self.frames.borrow_mut();
        if frames.pending.is_empty() {
            None
        } else {
            Some(frames.pending.remove(0))
        }
    }

    pub fn pending(&self) -> usize {
        self.frames.borrow().pending.len()
    }

    pub fn cancelled(&self) -> usize {
        self.frames.borrow().cancelled.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameId> {
        let mut frames = self.frames.borrow_mut();
        frames.next += 1;
        let id = FrameId(frames.next);
        frames.pending.push(id);
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let mut frames = self.frames.borrow_mut();
        if let Some(index) = frames.pending.iter().position(|f| *f == id) {
            frames.pending.remove(index);
            frames.cancelled.push(id);
        }
    }
}

/// The looping dashed outline shown after a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct MarchingAnts {
    frame: Option<FrameId>,
    period: f64,
}

impl MarchingAnts {
    pub fn new(period: f64) -> Self {
        Self {
            frame: None,
            period,
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Start (or restart) the loop.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<()> {
        self.cancel(scheduler);
        self.frame = Some(scheduler.request_frame()?);
        Ok(())
    }

    /// Stop the loop. Safe to call when not running.
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(id) = self.frame.take() {
            scheduler.cancel_frame(id);
        }
    }

    /// Step the dash offset, wrapping past the period.
    pub fn advance(&self, model: &mut AxisModel) {
        model.dash_offset += 1.0;
        if model.dash_offset > self.period {
            model.dash_offset = 0.0;
        }
    }

    /// Called when a frame fires; requests the next one. Returns `false`
    /// for a frame that belongs to a cancelled loop.
    pub fn on_frame(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<bool> {
        if self.frame.is_none() {
            return Ok(false);
        }
        self.frame = Some(scheduler.request_frame()?);
        Ok(true)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use super::{FrameId, FrameScheduler};
    use crate::error::{js_error, GridError, Result};

    /// `requestAnimationFrame` with a fixed callback.
    pub struct AnimationFrameScheduler {
        callback: Closure<dyn FnMut()>,
    }

    impl AnimationFrameScheduler {
        pub fn new(callback: Closure<dyn FnMut()>) -> Self {
            Self { callback }
        }
    }

    impl FrameScheduler for AnimationFrameScheduler {
        fn request_frame(&mut self) -> Result<FrameId> {
            let window = web_sys::window().ok_or("No window")?;
            window
                .request_animation_frame(self.callback.as_ref().unchecked_ref())
                .map(FrameId)
                .map_err(|e| GridError::Render(js_error("requestAnimationFrame", &e)))
        }

        fn cancel_frame(&mut self, id: FrameId) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id.0);
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    #[test]
    fn dash_offset_wraps_past_period() {
        let ants = MarchingAnts::new(16.0);
        let mut model = AxisModel::new(&GridConfig::default(), 10.0, 10.0);
        for _ in 0..16 {
            ants.advance(&mut model);
        }
        assert_eq!(model.dash_offset, 16.0);
        ants.advance(&mut model);
        assert_eq!(model.dash_offset, 0.0);
    }

    #[test]
    fn loop_requests_one_frame_at_a_time() {
        let mut scheduler = ManualScheduler::new();
        let mut ants = MarchingAnts::new(16.0);
        ants.start(&mut scheduler).unwrap();
        ants.start(&mut scheduler).unwrap();
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.cancelled(), 1);

        scheduler.fire().unwrap();
        assert!(ants.on_frame(&mut scheduler).unwrap());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut ants = MarchingAnts::new(16.0);
        ants.start(&mut scheduler).unwrap();
        ants.cancel(&mut scheduler);
        ants.cancel(&mut scheduler);
        assert_eq!(scheduler.cancelled(), 1);
        assert!(!ants.is_running());
        assert!(!ants.on_frame(&mut scheduler).unwrap());
        assert_eq!(scheduler.pending(), 0);
    }
}
