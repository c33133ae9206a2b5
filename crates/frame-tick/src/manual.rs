//! Manual tick source.

use crate::{Dispatcher, FrameDispatcher, FrameHooks, Phase};

/// Stands in for a host engine: fires dispatcher phases on demand.
///
/// Used by tests and tools that need deterministic frames without a clock.
#[derive(Debug, Clone)]
pub struct ManualTickSource {
    dispatcher: FrameDispatcher,
    frame_delta: f32,
    fixed_delta: f32,
    frames: u64,
}

impl ManualTickSource {
    /// Frame delta used by [`ManualTickSource::step`] unless overridden (60 fps).
    pub const DEFAULT_FRAME_DELTA: f32 = 1.0 / 60.0;

    /// Physics step used by [`ManualTickSource::step`] unless overridden (50 Hz).
    pub const DEFAULT_FIXED_DELTA: f32 = 0.02;

    #[must_use]
    pub fn new(dispatcher: FrameDispatcher) -> Self {
        Self::with_deltas(dispatcher, Self::DEFAULT_FRAME_DELTA, Self::DEFAULT_FIXED_DELTA)
    }

    #[must_use]
    pub fn with_deltas(dispatcher: FrameDispatcher, frame_delta: f32, fixed_delta: f32) -> Self {
        Self {
            dispatcher,
            frame_delta,
            fixed_delta,
            frames: 0,
        }
    }

    /// The dispatcher being pumped.
    #[must_use]
    pub fn dispatcher(&self) -> &FrameDispatcher {
        &self.dispatcher
    }

    /// Frames completed through [`ManualTickSource::step`].
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fire the host hook for `phase` with `delta`.
    ///
    /// `LateUpdate` goes through the late-update hook and so also raises
    /// end-of-frame. `EndOfFrame` raises only the end-of-frame event, which a
    /// real host cannot do on its own.
    pub fn fire(&self, phase: Phase, delta: f32) {
        match phase {
            Phase::Update => self.dispatcher.update(delta),
            Phase::LateUpdate => self.dispatcher.late_update(delta),
            Phase::FixedUpdate => self.dispatcher.fixed_update(delta),
            Phase::EndOfFrame => {
                self.dispatcher.event(Phase::EndOfFrame).raise(delta);
            }
        }
    }

    pub fn fire_update(&self, delta: f32) {
        self.fire(Phase::Update, delta);
    }

    pub fn fire_late_update(&self, delta: f32) {
        self.fire(Phase::LateUpdate, delta);
    }

    pub fn fire_fixed_update(&self, delta: f32) {
        self.fire(Phase::FixedUpdate, delta);
    }

    /// Run one frame with the configured deltas: one fixed step, update,
    /// then late-update (and with it end-of-frame).
    pub fn step(&mut self) {
        self.dispatcher.fixed_update(self.fixed_delta);
        self.dispatcher.update(self.frame_delta);
        self.dispatcher.late_update(self.frame_delta);
        self.frames += 1;
    }

    /// Run `count` frames.
    pub fn run(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }
}
